//! Project a used car's value over the coming years.
//!
//! Loads the dataset and the trained pipeline artifact, derives default
//! inputs from the first historical row matching the chosen brand and
//! model, applies any overrides, and prints the projection table and
//! value curve.
//!
//! # Usage
//! ```sh
//! cargo run --bin simulate -- --brand Toyota --model Avanza
//! cargo run --bin simulate -- --list-options
//! ```

use anyhow::{Context, Result};
use carcast::application::defaults::VehicleDefaults;
use carcast::application::simulator::project_values;
use carcast::config::AppConfig;
use carcast::domain::vehicle::SimulationRequest;
use carcast::infrastructure::{Dataset, model_store};
use carcast::interfaces::console::{
    format_rupiah, parse_grouped_integer, render_projection_table, render_value_curve,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Brand exactly as it appears in the dataset
    #[arg(long)]
    brand: Option<String>,

    /// Model, used to pick the default template row
    #[arg(long)]
    model: Option<String>,

    /// Production year (default: the template row's)
    #[arg(long)]
    year: Option<i32>,

    /// Fuel type (default: the template row's)
    #[arg(long)]
    fuel: Option<String>,

    /// Transmission (default: the template row's)
    #[arg(long)]
    transmission: Option<String>,

    /// Current price at the reference year; digit grouping allowed ("150.000.000")
    #[arg(long)]
    price: Option<String>,

    /// Current odometer reading at the reference year; digit grouping allowed
    #[arg(long)]
    kilometer: Option<String>,

    /// List available brands, models, fuels and transmissions, then exit
    #[arg(long)]
    list_options: bool,

    /// Dataset CSV (default: DATASET_PATH)
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Trained pipeline artifact (default: MODEL_PATH)
    #[arg(long)]
    artifact: Option<PathBuf>,
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

    let dataset_path = args.dataset.unwrap_or(config.dataset_path);
    let dataset = Dataset::load(&dataset_path)?;

    if args.list_options {
        print_options(&dataset);
        return Ok(());
    }

    let brand = args
        .brand
        .context("--brand is required (see --list-options)")?;
    let model = args
        .model
        .context("--model is required (see --list-options)")?;

    let artifact_path = args.artifact.unwrap_or(config.model_path);
    let pipeline = model_store::load_pipeline(&artifact_path)?;

    let reference_year = config.simulation.reference_year;
    let template = dataset
        .template(&brand, &model)
        .with_context(|| format!("No historical rows for {} {}", brand, model))?;
    let defaults = VehicleDefaults::from_template(template, reference_year);

    let fuel = args.fuel.unwrap_or_else(|| defaults.fuel.clone());
    let transmission = args
        .transmission
        .unwrap_or_else(|| defaults.transmission.clone());
    if !dataset.fuel_types().iter().any(|f| *f == fuel) {
        warn!("Fuel type '{}' does not appear in the dataset", fuel);
    }
    if !dataset.transmission_types().iter().any(|t| *t == transmission) {
        warn!("Transmission '{}' does not appear in the dataset", transmission);
    }

    let request = SimulationRequest {
        brand,
        year: args.year.unwrap_or(defaults.year),
        fuel,
        transmission,
        price: resolve_amount(args.price.as_deref(), defaults.price, "price"),
        kilometer: resolve_amount(args.kilometer.as_deref(), defaults.kilometer, "kilometer"),
    };

    let points = project_values(&request, &pipeline, &config.simulation)?;

    let first_year = points.first().map(|p| p.year).unwrap_or(reference_year + 1);
    let last_year = points.last().map(|p| p.year).unwrap_or(reference_year);

    println!(
        "\n{} {}: production year {}, price at {}: {}, odometer: {} km",
        request.brand,
        model,
        request.year,
        reference_year,
        format_rupiah(request.price),
        request.kilometer
    );
    println!("\nProjected values {}–{}:\n", first_year, last_year);
    print!("{}", render_projection_table(&points));
    println!();
    print!("{}", render_value_curve(&points));

    Ok(())
}

/// A user-entered amount falls back to the derived default when it does not
/// parse; this is never an error.
fn resolve_amount(input: Option<&str>, default: i64, field: &str) -> i64 {
    match input {
        None => default,
        Some(raw) => parse_grouped_integer(raw).unwrap_or_else(|| {
            warn!(
                "Could not parse {} entry '{}'; using default {}",
                field, raw, default
            );
            default
        }),
    }
}

fn print_options(dataset: &Dataset) {
    println!("Brands and models:");
    for brand in dataset.brands() {
        println!("  {}: {}", brand, dataset.models_for(&brand).join(", "));
    }
    println!("Fuel types: {}", dataset.fuel_types().join(", "));
    println!("Transmissions: {}", dataset.transmission_types().join(", "));
    let years = dataset.production_years();
    if let (Some(first), Some(last)) = (years.first(), years.last()) {
        println!("Production years: {}–{}", first, last);
    }
}
