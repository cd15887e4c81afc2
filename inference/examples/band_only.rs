//! Example: band extraction without a trained model
//!
//! Plugs a uniform classifier into the pipeline so the band statistics of
//! any spectrogram can be inspected before a model is available.
//!
//! Usage:
//!   cargo run --example band_only <image_path> [threshold_ratio]

use rf_signal_analyzer::{
    report, AnalyzerConfig, ClassLabels, FnClassifier, SignalAnalyzer, SpectrogramImage,
};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let image_path = args.get(1).map(String::as_str).unwrap_or("test_data/spectrogram.png");

    let mut config = AnalyzerConfig::default();
    if let Some(ratio) = args.get(2) {
        config.energy_threshold_ratio = ratio.parse()?;
    }

    let labels = ClassLabels::new(vec!["unknown".to_string()]);
    let classifier = FnClassifier::new("uniform", config.input_size, |_: &SpectrogramImage| {
        Ok(vec![1.0])
    });
    let mut analyzer = SignalAnalyzer::new(Box::new(classifier), labels, config)?;

    println!("📷 Loading image: {}", image_path);
    let result = analyzer.analyze_file(image_path)?;

    println!("{}\n", report::render_summary(&result));
    println!("{}", report::to_json_pretty(&result)?);

    Ok(())
}
