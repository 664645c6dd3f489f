//! End-to-end tests: pulse files on disk through to the report.

use std::io::Write;

use approx::assert_abs_diff_eq;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tempfile::NamedTempFile;

use d2_estimator::{
    analyze, delay_embed, estimate_d2, load_pulses, AnalysisConfig, CorrelationIntegral,
    D2Error, ReferenceSet,
};

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_crafted_file_normalizes_both_columns() {
    let file = write_file(
        "# string om time[ns] charge[pe]\n\
         ## event 1\n\
         1 1 0.0 1.0\n\
         1 2 1.0 2.0\n\
         1 3 2.0 3.0\n",
    );
    let data = load_pulses(file.path()).unwrap();

    assert_eq!(data.points.len(), 3);
    assert_eq!(data.summary.comments, 2);
    let times = data.points.column(0).to_vec();
    let charges = data.points.column(1).to_vec();
    for (i, want) in [0.0, 0.5, 1.0].into_iter().enumerate() {
        assert_abs_diff_eq!(times[i], want, epsilon = 1e-12);
        assert_abs_diff_eq!(charges[i], want, epsilon = 1e-12);
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_pulses(std::path::Path::new("/nonexistent/pulses.txt")).unwrap_err();
    assert!(matches!(err, D2Error::Io(_)));
}

#[test]
fn test_line_has_dimension_one() {
    let config = AnalysisConfig::default();
    let estimator = CorrelationIntegral::from_config(&config).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(2024);

    let line = ReferenceSet::Line.generate(20_000, &mut rng).unwrap();
    let estimate = estimate_d2(&line, &estimator, &config.fit_range, &mut rng).unwrap();
    let fit = estimate.fit;

    assert_eq!(estimate.points_used, config.max_points);
    assert!((fit.slope - 1.0).abs() < 0.2, "line D₂ = {}", fit.slope);
    assert!(fit.r_squared > 0.95);
}

#[test]
fn test_square_has_dimension_two() {
    let config = AnalysisConfig::default();
    let estimator = CorrelationIntegral::from_config(&config).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(2025);

    let square = ReferenceSet::Square.generate(5_000, &mut rng).unwrap();
    let fit = estimate_d2(&square, &estimator, &config.fit_range, &mut rng).unwrap().fit;

    assert!((fit.slope - 2.0).abs() < 0.2, "square D₂ = {}", fit.slope);
}

#[test]
fn test_embedding_count() {
    let series: Vec<f64> = (0..12).map(|i| i as f64 / 11.0).collect();
    assert_eq!(delay_embed(&series, 10).unwrap().len(), 2);
}

#[test]
fn test_analyze_synthetic_event() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(77);
    let mut contents = String::from("# string om time[ns] charge[pe]\n");
    for i in 0..1500 {
        let time = i as f64 * 3.7 + rng.random::<f64>() * 50.0;
        let charge = (rng.random::<f64>() * 4.0).exp();
        contents.push_str(&format!("{} {} {:.3} {:.4}\n", i % 86, i % 60, time, charge));
    }
    contents.push_str("garbage line here\n");
    let file = write_file(&contents);

    let config = AnalysisConfig {
        n_bootstrap: 8,
        max_points: 800,
        ..AnalysisConfig::default()
    };
    let data = load_pulses(file.path()).unwrap();
    let report = analyze(&data, "synthetic", &config).unwrap();

    assert_eq!(report.load.accepted, 1500);
    assert_eq!(report.load.skipped, 1);
    assert_eq!(report.full_points_used, 800);
    assert_eq!(report.bootstrap.n_replicates(), 8);
    assert_eq!(report.bootstrap.sample_size, 800);
    assert!(report.full.slope.is_finite() && report.full.slope > 0.0);
    assert!(report.time_only.slope.is_finite());
    assert_abs_diff_eq!(report.prediction, 19.0 / 13.0, epsilon = 1e-12);

    // Same seed, same report
    let again = analyze(&data, "synthetic", &config).unwrap();
    assert_eq!(report.bootstrap.slopes, again.bootstrap.slopes);
    assert_eq!(report.full.slope, again.full.slope);

    let text = report.to_string();
    assert!(text.contains("COMPARISON TO PREDICTION"));
    assert!(text.contains("Skipped 1 malformed line(s)"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["load"]["accepted"], 1500);
}

#[test]
fn test_config_file_overrides() {
    let file = write_file(r#"{ "n_bootstrap": 12, "fit_range": { "start": 0.1, "end": 0.9 } }"#);
    let config = AnalysisConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.n_bootstrap, 12);
    assert_eq!(config.fit_range.start, 0.1);
    assert_eq!(config.max_points, 5000);

    let bad = write_file(r#"{ "r_min": 5.0 }"#);
    assert!(matches!(
        AnalysisConfig::from_json_file(bad.path()),
        Err(D2Error::InvalidConfig(_))
    ));
}
