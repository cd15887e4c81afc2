//! Classify a spectrogram and extract its dominant frequency band
//!
//! Usage:
//!   cargo run --release --features onnx --bin rf-analyze -- <image> [--output rf_analysis.json]

use anyhow::Context;
use clap::Parser;
use rf_signal_analyzer::{report, AnalyzerConfig, SignalAnalyzer};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rf-analyze", version, about = "RF spectrogram signal analyzer")]
struct Args {
    /// Spectrogram image (PNG/JPEG)
    image: PathBuf,

    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ONNX classifier model
    #[arg(short, long)]
    model: Option<String>,

    /// JSON array of class names
    #[arg(short, long)]
    labels: Option<String>,

    /// Fraction of the peak column energy a column must exceed
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Classifier input width
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Classifier input height
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Write the JSON result to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print JSON instead of the summary
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> anyhow::Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    if let Some(model) = &args.model {
        config.model_path = model.clone();
    }
    if let Some(labels) = &args.labels {
        config.labels_path = labels.clone();
    }
    if let Some(threshold) = args.threshold {
        config.energy_threshold_ratio = threshold;
    }
    if let (Some(width), Some(height)) = (args.width, args.height) {
        config.input_size = (width, height);
    }

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let mut analyzer = SignalAnalyzer::from_config(config).context("loading classifier")?;
    let result = analyzer
        .analyze_file(&args.image)
        .with_context(|| format!("analyzing {}", args.image.display()))?;

    if args.json {
        println!("{}", report::to_json_pretty(&result)?);
    } else {
        println!("{}", report::render_summary(&result));
    }

    if let Some(output) = &args.output {
        report::write_json(&result, output)
            .with_context(|| format!("writing {}", output.display()))?;
    }

    Ok(())
}
