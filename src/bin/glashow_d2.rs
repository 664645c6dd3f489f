//! Glashow Resonance Event: Correlation Dimension Analysis
//!
//! Estimates D₂ for the photon pulses of a single IceCube cascade
//! (6.05 PeV electron antineutrino) and compares it with the predicted
//! value D₂ = 19/13 ≈ 1.4615.
//!
//! ## Protocol
//!
//! 1. Load pulses (string, om, time [ns], charge [pe]) and normalize
//! 2. D₂ in the (time, charge) plane
//! 3. Bootstrap the estimate for its spread
//! 4. D₂ of the time series alone via delay embedding
//! 5. Compare with the prediction and print a verdict

use std::path::PathBuf;

use clap::Parser;

use d2_estimator::{analyze, AnalysisConfig, PulseLoader};

/// Correlation dimension (D₂) analysis of a detector pulse file
#[derive(Parser)]
#[command(name = "glashow-d2")]
#[command(about = "Grassberger-Procaccia D₂ of a single-event pulse file")]
struct Args {
    /// Pulse file (whitespace-separated: string om time charge)
    #[arg(short, long, default_value = "data/event.txt")]
    input: PathBuf,

    /// JSON file with analysis settings (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Master random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of bootstrap resamples
    #[arg(long)]
    bootstrap: Option<usize>,

    /// Point budget for pair counting
    #[arg(long)]
    max_points: Option<usize>,

    /// Delay τ for the time-only embedding
    #[arg(long)]
    delay: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(n) = args.bootstrap {
        config.n_bootstrap = n;
    }
    if let Some(n) = args.max_points {
        config.max_points = n;
    }
    if let Some(tau) = args.delay {
        config.embedding_delay = tau;
    }
    config.validate()?;

    if !args.json {
        println!("======================================================================");
        println!("Glashow Resonance Event - Correlation Dimension Analysis");
        println!("Predicted: D₂ = {:.4}", config.prediction);
        println!("======================================================================");
        println!();
    }

    if !args.input.exists() {
        println!("Error: Data file not found: {}", args.input.display());
        return Ok(());
    }

    let data = PulseLoader::default().load(&args.input)?;
    let source = args.input.display().to_string();
    let report = analyze(&data, &source, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
