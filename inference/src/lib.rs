//! RF Signal Analyzer Library
//!
//! Classifies the radio signal shown in a spectrogram image and measures the
//! dominant frequency band: its normalized center, width and an energy
//! contrast score. The classifier is injected behind the [`Classifier`]
//! trait; an ONNX Runtime implementation ships behind the `onnx` feature.

pub mod band;
pub mod classifier;
#[cfg(feature = "onnx")]
pub mod classifier_onnx;
pub mod config;
pub mod error;
pub mod image_data;
pub mod labels;
pub mod pipeline;
pub mod preprocessing;
pub mod report;
pub mod types;

pub use band::{extract_frequency_band_params, ColumnEnergyProfile};
pub use classifier::{classify, Classifier, FnClassifier};
#[cfg(feature = "onnx")]
pub use classifier_onnx::OnnxClassifier;
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use image_data::{load_spectrogram_gray, PixelFormat, SpectrogramImage};
pub use labels::ClassLabels;
pub use pipeline::SignalAnalyzer;
pub use types::{AnalysisResult, BandParams, ClassificationResult};

/// Get library version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
