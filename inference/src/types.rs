//! Type definitions for spectrogram analysis results

use serde::{Deserialize, Serialize};

/// Statistics of the dominant frequency band in a spectrogram
///
/// Columns are frequency bins, so every normalized value is relative to the
/// image width. `start_col..=end_col` is the band; it may contain columns
/// that fall below the energy threshold as long as they lie between the
/// first and last active column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandParams {
    /// Band center as a fraction of the image width
    pub center_freq_norm: f64,
    /// Band width as a fraction of the image width, in (0, 1]
    pub bandwidth_norm: f64,
    /// Mean band energy minus mean background energy (not in dB)
    pub snr_like: f64,
    /// First column of the band (inclusive)
    pub start_col: usize,
    /// Last column of the band (inclusive)
    pub end_col: usize,
}

impl BandParams {
    /// Number of columns covered by the band
    pub fn width_cols(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    /// Whether a column index lies inside the band
    pub fn contains(&self, col: usize) -> bool {
        (self.start_col..=self.end_col).contains(&col)
    }
}

/// Arg-max output of the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Class label, or `class_<index>` when the label list is too short
    pub predicted_class: String,
    /// Probability of the predicted class (0-1)
    pub confidence: f32,
}

/// Full analysis of one spectrogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub predicted_class: String,
    pub confidence: f32,
    /// `None` when no column clears the energy threshold
    pub band_params: Option<BandParams>,
}

impl AnalysisResult {
    /// Merge the two independent stage outputs
    pub fn new(classification: ClassificationResult, band_params: Option<BandParams>) -> Self {
        Self {
            predicted_class: classification.predicted_class,
            confidence: classification.confidence,
            band_params,
        }
    }

    /// Whether a dominant band was found
    pub fn has_band(&self) -> bool {
        self.band_params.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_width_cols() {
        let band = BandParams {
            center_freq_norm: 0.4,
            bandwidth_norm: 0.3,
            snr_like: 5.0,
            start_col: 3,
            end_col: 5,
        };
        assert_eq!(band.width_cols(), 3);
        assert!(band.contains(3));
        assert!(band.contains(5));
        assert!(!band.contains(6));
    }

    #[test]
    fn test_absent_band_serializes_as_null() {
        let result = AnalysisResult::new(
            ClassificationResult {
                predicted_class: "wifi".to_string(),
                confidence: 0.5,
            },
            None,
        );
        let value = serde_json::to_value(&result).unwrap();
        assert!(value["band_params"].is_null());
        assert_eq!(value["predicted_class"], "wifi");
        assert!(!result.has_band());
    }
}
