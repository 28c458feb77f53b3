//! Fit the used-car valuation pipeline and save the artifact.
//!
//! # Usage
//! ```sh
//! cargo run --bin train -- --input data/depreciated-clear.csv
//! ```
//!
//! Flags override the `DATASET_PATH` / `MODEL_PATH` environment variables.

use anyhow::Result;
use carcast::application::ml::TrainingParams;
use carcast::application::trainer::Trainer;
use carcast::config::AppConfig;
use carcast::infrastructure::{Dataset, model_store};
use carcast::interfaces::console::format_rupiah;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the historical dataset CSV (default: DATASET_PATH)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Path to write the fitted pipeline artifact (default: MODEL_PATH)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Number of trees in the random forest
    #[arg(long, default_value_t = 100)]
    n_trees: usize,

    /// Maximum depth of trees
    #[arg(long, default_value_t = 10)]
    max_depth: u16,

    /// Minimum samples required to split an internal node
    #[arg(long, default_value_t = 5)]
    min_split: usize,

    /// Seed for the regression model
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Seed for the 80/20 held-out split
    #[arg(long, default_value_t = 42)]
    split_seed: u64,

    /// Disable the train/test split (train on 100% of data). Use after validation.
    #[arg(long)]
    no_split: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env();
    let input = args.input.unwrap_or(config.dataset_path);
    let output = args.output.unwrap_or(config.model_path);

    let dataset = Dataset::load(&input)?;

    let n = dataset.len();
    let values: Vec<f64> = dataset
        .records()
        .iter()
        .map(|r| r.estimated_value as f64)
        .collect();
    let mean = values.iter().sum::<f64>() / n as f64;
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    println!("\nTarget Distribution (Estimated_Value):");
    println!("  Rows:   {}", n);
    println!("  Brands: {}", dataset.brands().len());
    println!("  Mean:   {}", format_rupiah(mean as i64));
    println!("  Min:    {}", format_rupiah(min as i64));
    println!("  Max:    {}", format_rupiah(max as i64));
    println!();

    let params = TrainingParams {
        n_trees: args.n_trees,
        max_depth: args.max_depth,
        min_samples_split: args.min_split,
        seed: args.seed,
    };
    let trainer = Trainer::new(params).with_split_seed(args.split_seed);

    let pipeline = if args.no_split {
        println!("Training on all {} rows (no held-out split)...", n);
        trainer.train_full(dataset.records())?
    } else {
        println!("Training with a seeded 80/20 split...");
        let outcome = trainer.train(dataset.records())?;
        if let Some(report) = &outcome.report {
            println!(
                "Held-out evaluation (n={}): MAE={}, R²={:.4}",
                report.test_rows,
                format_rupiah(report.mae as i64),
                report.r2
            );
        }
        outcome.pipeline
    };

    model_store::save_pipeline(&output, &pipeline)?;
    println!("Done. Model saved to {:?}.", output);
    Ok(())
}
