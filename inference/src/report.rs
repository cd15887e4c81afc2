//! Human-readable summary and JSON export of analysis results

use crate::error::Result;
use crate::types::AnalysisResult;
use std::path::Path;

/// File name offered for the JSON download
pub const DEFAULT_REPORT_FILE: &str = "rf_analysis.json";

/// Pretty JSON with two-space indentation and unrounded floats
pub fn to_json_pretty(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub fn write_json<P: AsRef<Path>>(result: &AnalysisResult, path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_json_pretty(result)?)?;
    log::info!("Wrote analysis to {}", path.display());
    Ok(())
}

/// Display block; values are rounded here only
pub fn render_summary(result: &AnalysisResult) -> String {
    let mut lines = vec![
        "Classification".to_string(),
        format!("  Prediction: {}", result.predicted_class),
        format!("  Confidence: {:.2}%", result.confidence * 100.0),
        String::new(),
        "Extracted Parameters".to_string(),
    ];

    match &result.band_params {
        None => lines.push("  No clear band detected.".to_string()),
        Some(band) => {
            lines.push(format!(
                "  Center frequency (normalized): {:.3}",
                band.center_freq_norm
            ));
            lines.push(format!("  Bandwidth (normalized): {:.3}", band.bandwidth_norm));
            lines.push(format!("  SNR-like score: {:.3}", band.snr_like));
            lines.push(format!("  Band columns: {} → {}", band.start_col, band.end_col));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BandParams, ClassificationResult};

    fn sample(band: Option<BandParams>) -> AnalysisResult {
        AnalysisResult::new(
            ClassificationResult {
                predicted_class: "lte".to_string(),
                confidence: 0.5,
            },
            band,
        )
    }

    fn band() -> BandParams {
        BandParams {
            center_freq_norm: 0.4,
            bandwidth_norm: 0.3,
            snr_like: 0.123456789,
            start_col: 3,
            end_col: 5,
        }
    }

    #[test]
    fn test_summary_with_band() {
        let text = render_summary(&sample(Some(band())));
        assert!(text.contains("Prediction: lte"));
        assert!(text.contains("Confidence: 50.00%"));
        assert!(text.contains("Center frequency (normalized): 0.400"));
        assert!(text.contains("Bandwidth (normalized): 0.300"));
        assert!(text.contains("SNR-like score: 0.123"));
        assert!(text.contains("Band columns: 3 → 5"));
    }

    #[test]
    fn test_summary_without_band() {
        let text = render_summary(&sample(None));
        assert!(text.contains("No clear band detected."));
        assert!(!text.contains("Band columns"));
    }

    #[test]
    fn test_json_keeps_full_precision() {
        let json = to_json_pretty(&sample(Some(band()))).unwrap();
        assert!(json.contains("\"snr_like\": 0.123456789"));
        assert!(json.contains("\n  \"predicted_class\": \"lte\""));

        let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample(Some(band())));
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_REPORT_FILE);
        write_json(&sample(None), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["predicted_class"], "lte");
        assert!(value["band_params"].is_null());
    }
}
