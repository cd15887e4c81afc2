//! Error types for the RF signal analyzer

use thiserror::Error;

/// Result type alias for the analyzer library
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while analyzing a spectrogram
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Image decoding failed: {0}")]
    DecodeError(String),

    #[error("Model loading failed: {0}")]
    ModelLoadError(String),

    #[error("Inference failed: {0}")]
    InferenceError(String),

    #[error("Image preprocessing failed: {0}")]
    PreprocessingError(String),

    #[error("Invalid input dimensions: expected {expected:?}, got {actual:?}")]
    InvalidDimensions {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Class label error: {0}")]
    LabelsError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AnalysisError {
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::DecodeError(msg.into())
    }

    pub fn model_load<S: Into<String>>(msg: S) -> Self {
        Self::ModelLoadError(msg.into())
    }

    pub fn inference<S: Into<String>>(msg: S) -> Self {
        Self::InferenceError(msg.into())
    }

    pub fn preprocessing<S: Into<String>>(msg: S) -> Self {
        Self::PreprocessingError(msg.into())
    }

    pub fn labels<S: Into<String>>(msg: S) -> Self {
        Self::LabelsError(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }
}
