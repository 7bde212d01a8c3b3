//! Command-line driver for the classification pipeline.
//!
//! Classifies every supported image in the input directory, sorts the
//! results into per-label folders under the output root, prints the
//! per-label summary, and optionally writes the report as JSON for
//! downstream visualization.
//!
//! Usage:
//! ```
//! fashion-sorter --model-path fashion_mnist_model.onnx \
//!     --input-dir test-image --output-dir result
//! ```

use clap::Parser;
use fashion_sorter::core::{PipelineConfig, init_tracing};
use fashion_sorter::pipeline::PipelineBuilder;
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line arguments for the classification pipeline.
#[derive(Parser)]
#[command(name = "fashion-sorter")]
#[command(about = "Classifies fashion images with an ONNX model and sorts them into per-label folders")]
struct Args {
    /// Path to the ONNX model artifact
    #[arg(short, long, conflicts_with = "config")]
    model_path: Option<PathBuf>,

    /// Directory of images to classify
    #[arg(short, long, conflicts_with = "config")]
    input_dir: Option<PathBuf>,

    /// Output root; removed and recreated on every run
    #[arg(short, long, conflicts_with = "config")]
    output_dir: Option<PathBuf>,

    /// JSON pipeline configuration file (alternative to the path flags)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the final report as JSON to this path
    #[arg(long)]
    report_json: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => {
            let (Some(model_path), Some(input_dir), Some(output_dir)) = (
                args.model_path.clone(),
                args.input_dir.clone(),
                args.output_dir.clone(),
            ) else {
                error!(
                    "either --config or all of --model-path, --input-dir and --output-dir are required"
                );
                return Err("missing arguments".into());
            };
            PipelineConfig::new(input_dir, output_dir, model_path)
        }
    };

    if !config.model_path.exists() {
        error!("model file not found: {}", config.model_path.display());
        return Err("model file not found".into());
    }

    let pipeline = PipelineBuilder::from_config(config).build()?;
    let report = pipeline.run()?;

    println!("{report}");

    if let Some(path) = &args.report_json {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &report)?;
        info!("report written to {}", path.display());
    }

    Ok(())
}
