//! Spectrogram classifier backed by ONNX Runtime
//!
//! The model is loaded once and reused for every request. It must take a
//! single f32 image tensor (layout and scale per [`AnalyzerConfig`]) and
//! return one score per class.

use crate::classifier::Classifier;
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use crate::image_data::SpectrogramImage;
use crate::preprocessing::ImagePreprocessor;
use log::{debug, info};
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::TensorRef,
};
use std::time::Instant;

pub struct OnnxClassifier {
    session: Session,
    preprocessor: ImagePreprocessor,
}

impl OnnxClassifier {
    /// Load the model named by `config.model_path` on the CPU
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        info!("Initializing ONNX Runtime classifier");
        info!("Model: {}", config.model_path);

        let mut builder = Session::builder()
            .map_err(|e| AnalysisError::model_load(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| AnalysisError::model_load(e.to_string()))?;

        if let Some(threads) = config.num_threads {
            builder = builder
                .with_intra_threads(threads)
                .map_err(|e| AnalysisError::model_load(e.to_string()))?;
        }

        let session = builder
            .commit_from_file(&config.model_path)
            .map_err(|e| AnalysisError::model_load(format!("Failed to load model: {}", e)))?;

        info!("✓ Model loaded successfully");

        Ok(Self {
            session,
            preprocessor: ImagePreprocessor::from_config(config),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&mut self, image: &SpectrogramImage) -> Result<Vec<f32>> {
        let start = Instant::now();
        let input_tensor = self.preprocessor.preprocess(image)?;

        let tensor_ref = TensorRef::from_array_view(&input_tensor)
            .map_err(|e| AnalysisError::inference(e.to_string()))?;

        let outputs = self
            .session
            .run(ort::inputs![tensor_ref])
            .map_err(|e| AnalysisError::inference(e.to_string()))?;

        // Flatten [1, classes] (or [classes]) to one score per class
        let scores: Vec<f32> = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| AnalysisError::inference(e.to_string()))?
            .iter()
            .copied()
            .collect();

        debug!(
            "Inference produced {} scores in {:.1}ms",
            scores.len(),
            start.elapsed().as_secs_f32() * 1000.0
        );

        Ok(scores)
    }

    fn name(&self) -> &str {
        "ONNX"
    }

    fn input_size(&self) -> (u32, u32) {
        self.preprocessor.input_size()
    }
}
