//! Analysis pipeline: classification followed by band extraction

use crate::band::extract_frequency_band_params;
use crate::classifier::{classify, Classifier};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::image_data::SpectrogramImage;
use crate::labels::ClassLabels;
use crate::types::AnalysisResult;
use std::path::Path;
use std::time::Instant;

/// Timing information for each stage, in milliseconds
#[derive(Clone, Debug, Default)]
pub struct StageTiming {
    pub classify_ms: f32,
    pub band_ms: f32,
    pub total_ms: f32,
}

/// Long-lived analyzer holding the loaded model and its class names
///
/// Build it once at startup and pass it to whatever serves requests; each
/// call to [`SignalAnalyzer::analyze`] is independent.
pub struct SignalAnalyzer {
    classifier: Box<dyn Classifier>,
    labels: ClassLabels,
    config: AnalyzerConfig,
    last_timing: StageTiming,
}

impl SignalAnalyzer {
    pub fn new(
        classifier: Box<dyn Classifier>,
        labels: ClassLabels,
        config: AnalyzerConfig,
    ) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Signal analyzer ready: {} classifier, {} labels, threshold ratio {}",
            classifier.name(),
            labels.len(),
            config.energy_threshold_ratio
        );
        Ok(Self {
            classifier,
            labels,
            config,
            last_timing: StageTiming::default(),
        })
    }

    /// Load the ONNX model and class names named in the config
    #[cfg(feature = "onnx")]
    pub fn from_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let labels = ClassLabels::from_json_file(&config.labels_path)?;
        let classifier = crate::classifier_onnx::OnnxClassifier::new(&config)?;
        Self::new(Box::new(classifier), labels, config)
    }

    /// Classify the image and extract its dominant band
    pub fn analyze(&mut self, image: &SpectrogramImage) -> Result<AnalysisResult> {
        let start = Instant::now();

        let classification = classify(
            self.classifier.as_mut(),
            &self.labels,
            image,
            self.config.apply_softmax,
        )?;
        let classify_ms = start.elapsed().as_secs_f32() * 1000.0;

        let band_start = Instant::now();
        let grid = image.to_intensity_grid();
        let band_params =
            extract_frequency_band_params(grid.view(), self.config.energy_threshold_ratio);
        let band_ms = band_start.elapsed().as_secs_f32() * 1000.0;

        self.last_timing = StageTiming {
            classify_ms,
            band_ms,
            total_ms: start.elapsed().as_secs_f32() * 1000.0,
        };
        log::debug!(
            "Analysis of {}x{} image: classify {:.1}ms, band {:.1}ms",
            image.width(),
            image.height(),
            classify_ms,
            band_ms
        );

        Ok(AnalysisResult::new(classification, band_params))
    }

    pub fn analyze_file<P: AsRef<Path>>(&mut self, path: P) -> Result<AnalysisResult> {
        let image = SpectrogramImage::from_file(path)?;
        self.analyze(&image)
    }

    /// Analyze an uploaded PNG/JPEG held in memory
    pub fn analyze_bytes(&mut self, bytes: &[u8]) -> Result<AnalysisResult> {
        let image = SpectrogramImage::from_bytes(bytes)?;
        self.analyze(&image)
    }

    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Stage timings of the most recent successful analysis
    pub fn last_timing(&self) -> &StageTiming {
        &self.last_timing
    }
}
