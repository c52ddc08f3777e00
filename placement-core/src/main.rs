//! Placement Predictor - Training Entry Point
//!
//! Generates the synthetic dataset, fits the forest, and writes the
//! schema/model artifact pair.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use placement_core::constants::{self, APP_NAME, APP_VERSION};
use placement_core::logic::dataset;
use placement_core::logic::training;
use placement_core::TrainingConfig;

#[derive(Parser, Debug)]
#[command(name = "placement-train", version, about = "Train the package predictor and write its artifacts")]
struct Cli {
    /// Training config (JSON). Defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Artifact output directory
    #[arg(short, long, env = "ARTIFACT_DIR")]
    out_dir: Option<PathBuf>,

    /// Override the number of synthetic samples
    #[arg(long)]
    samples: Option<usize>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the generated profiles as JSONL
    #[arg(long)]
    export_dataset: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("{} v{} - training", APP_NAME, APP_VERSION);

    let mut config = match &cli.config {
        Some(path) => TrainingConfig::from_file(path)
            .with_context(|| format!("loading training config {}", path.display()))?,
        None => TrainingConfig::default(),
    };
    if let Some(samples) = cli.samples {
        config.num_samples = samples;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    if let Some(path) = &cli.export_dataset {
        let profiles = dataset::generate(&config)?;
        dataset::export::to_jsonl(&profiles, path)
            .with_context(|| format!("exporting dataset to {}", path.display()))?;
    }

    let out_dir = cli.out_dir.unwrap_or_else(constants::get_artifact_dir);
    let report = training::train(&config, &out_dir).context("training failed")?;

    println!("Dummy data generated, model trained, and saved successfully:");
    println!("  - Run:    {}", report.run_id);
    println!("  - Model:  {}", out_dir.join(constants::MODEL_FILE).display());
    println!("  - Schema: {}", out_dir.join(constants::SCHEMA_FILE).display());
    println!("  - Features ({}): {}", report.feature_count, report.feature_names.join(", "));
    println!("\nModel R^2 score: {:.2}", report.r2_train);

    Ok(())
}
