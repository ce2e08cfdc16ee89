//! Self-join matrix profile with STMP.
//!
//! Builds a noisy periodic signal, computes its exact matrix profile and
//! reports the best motif pair and the most anomalous subsequence.
//!
//! Run with: RUST_LOG=matprof=debug cargo run --release --example basic_matrix_profile

use matprof::{Engine, MatrixProfileConfig, ProfileError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ProfileError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let n = 500;
    let m = 50;

    let ts: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            let base = (t * std::f64::consts::TAU / 100.0).sin();
            let noise = ((t * 7.3).sin() * (t * 13.7).cos()) * 0.05;
            base + noise
        })
        .collect();

    let mut engine = Engine::new(MatrixProfileConfig::new(m));
    let mp = engine.stmp(&ts)?;

    println!("Time series length: {n}");
    println!("Subsequence length: {m}");
    println!("Matrix profile length: {}", mp.len());

    let Some((min_idx, min_dist)) = mp
        .profile
        .iter()
        .copied()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
    else {
        return Ok(());
    };

    println!("\nBest matching pair:");
    println!("  Subsequence at index {min_idx}");
    if let Some(nn) = mp.neighbor(min_idx) {
        println!("  Nearest neighbor at index {nn}");
    }
    println!("  Distance: {min_dist:.6}");

    if let Some((max_idx, max_dist)) = mp
        .profile
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, d)| d.is_finite())
        .max_by(|a, b| a.1.total_cmp(&b.1))
    {
        println!("\nMost anomalous subsequence:");
        println!("  Index: {max_idx}");
        println!("  Distance: {max_dist:.6}");
    }

    Ok(())
}
