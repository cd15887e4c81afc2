//! Analyzer configuration

use crate::error::{AnalysisError, Result};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default fraction of the peak column energy a column must exceed
pub const DEFAULT_ENERGY_THRESHOLD_RATIO: f64 = 0.3;

/// Default classifier input size (width, height)
pub const DEFAULT_INPUT_SIZE: (u32, u32) = (224, 224);

/// Memory layout of the classifier input tensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TensorLayout {
    /// [batch, height, width, channels]
    #[default]
    Nhwc,
    /// [batch, channels, height, width]
    Nchw,
}

/// Pixel value range fed to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelScale {
    /// 0..255 as f32
    #[default]
    Raw,
    /// 0..1
    Unit,
}

impl PixelScale {
    pub fn apply(&self, value: u8) -> f32 {
        match self {
            PixelScale::Raw => value as f32,
            PixelScale::Unit => value as f32 / 255.0,
        }
    }
}

/// Interpolation used when resizing to the classifier input size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    #[default]
    Nearest,
    Triangle,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Configuration for the signal analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Path to the ONNX classifier
    pub model_path: String,

    /// Path to the JSON array of class names, in model output order
    pub labels_path: String,

    /// Classifier input size (width, height)
    pub input_size: (u32, u32),

    /// Fraction of the peak column energy used as the band threshold
    pub energy_threshold_ratio: f64,

    pub tensor_layout: TensorLayout,

    pub pixel_scale: PixelScale,

    pub resize_filter: ResizeFilter,

    /// Set when the model emits logits instead of probabilities
    pub apply_softmax: bool,

    /// Number of intra-op threads for CPU inference
    pub num_threads: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model_path: "models/rf_classifier.onnx".to_string(),
            labels_path: "kept_classes.json".to_string(),
            input_size: DEFAULT_INPUT_SIZE,
            energy_threshold_ratio: DEFAULT_ENERGY_THRESHOLD_RATIO,
            tensor_layout: TensorLayout::default(),
            pixel_scale: PixelScale::default(),
            resize_filter: ResizeFilter::default(),
            apply_softmax: false,
            num_threads: None,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a JSON file; absent fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            AnalysisError::config(format!("Invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        log::debug!("Loaded analyzer config from {}", path.display());
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let ratio = self.energy_threshold_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(AnalysisError::config(format!(
                "energy_threshold_ratio must be within [0, 1], got {}",
                ratio
            )));
        }

        if self.input_size.0 == 0 || self.input_size.1 == 0 {
            return Err(AnalysisError::config(format!(
                "input_size must be non-zero, got {:?}",
                self.input_size
            )));
        }

        if self.num_threads == Some(0) {
            return Err(AnalysisError::config("num_threads must be at least 1"));
        }

        Ok(())
    }
}
