//! Reference D₂: Estimator Calibration on Known Geometries
//!
//! Runs the same correlation-integral and fit settings used for detector
//! data on synthetic point clouds whose D₂ is known, so a systematic bias
//! of the estimator shows up before it is read into a measurement.
//!
//! ## Protocol
//!
//! 1. Generate each reference set (line, square, Hénon) with a fixed seed
//! 2. Estimate D₂ directly and with a short bootstrap
//! 3. Print measured vs known dimension

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use d2_estimator::{
    estimate_d2, AnalysisConfig, BootstrapAggregator, CorrelationIntegral, ReferenceSet,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Reference D₂: Grassberger-Procaccia Calibration");
    println!("═══════════════════════════════════════════════════════════════\n");

    let n_points = 20_000;
    let config = AnalysisConfig {
        n_bootstrap: 20,
        ..AnalysisConfig::default()
    };
    config.validate()?;

    println!("Estimator Settings:");
    println!("  r ∈ [{:.0e}, {:.1}], {} radii", config.r_min, config.r_max, config.n_radii);
    println!(
        "  Fit window: {:.0}% - {:.0}% of radii",
        config.fit_range.start * 100.0,
        config.fit_range.end * 100.0
    );
    println!("  Point budget: {}", config.max_points);
    println!("  Bootstrap: {} resamples", config.n_bootstrap);
    println!();

    let estimator = CorrelationIntegral::from_config(&config)?;
    let bootstrap = BootstrapAggregator::from_config(&config)?;
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);

    println!("{:<24} {:>7} {:>16} {:>18} {:>8}", "Set", "Known", "D₂ (direct)", "D₂ (bootstrap)", "Bias");
    println!("─────────────────────────────────────────────────────────────────────────────");

    for set in ReferenceSet::ALL {
        let points = set.generate(n_points, &mut rng)?;
        let fit = estimate_d2(&points, &estimator, &config.fit_range, &mut rng)?.fit;
        let boot = bootstrap.run(&points, config.seed)?;

        println!(
            "{:<24} {:>7.3} {:>8.3} ± {:<5.3} {:>9.3} ± {:<6.3} {:>+8.3}",
            set.name(),
            set.known_dimension(),
            fit.slope,
            fit.standard_error,
            boot.mean,
            boot.std,
            boot.mean - set.known_dimension()
        );
    }

    println!("\n─────────────────────────────────────────────────────────────");
    println!("Note:");
    println!("  Finite radii bias D₂ low for space-filling sets (edge effects");
    println!("  at large r); a bias beyond ~0.15 makes the detector-data");
    println!("  comparison inconclusive at that tolerance.");

    println!("\n═══════════════════════════════════════════════════════════════");
    println!("  Calibration Complete");
    println!("═══════════════════════════════════════════════════════════════");

    Ok(())
}
