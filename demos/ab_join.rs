//! AB-join: matching the windows of one series against another.
//!
//! Series B contains one of the two Gaussian pulses embedded in series A.
//! The AB-join profile has one entry per window of B; its minimum points
//! at the shared pulse.
//!
//! Run with: cargo run --release --example ab_join

use matprof::{Engine, MatrixProfileConfig, ProfileError};
use tracing_subscriber::EnvFilter;

fn pulse(t: f64, center: f64) -> f64 {
    2.0 * (-(t - center).powi(2) / 50.0).exp()
}

fn main() -> Result<(), ProfileError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let m = 30;

    // Series A: sine wave with pulses at 100 and 300
    let ts_a: Vec<f64> = (0..400)
        .map(|i| {
            let t = i as f64;
            (t * std::f64::consts::TAU / 80.0).sin() * 0.5 + pulse(t, 100.0) + pulse(t, 300.0)
        })
        .collect();

    // Series B: different base signal, one matching pulse at 150
    let ts_b: Vec<f64> = (0..300)
        .map(|i| {
            let t = i as f64;
            (t * std::f64::consts::TAU / 45.0).cos() * 0.3 + pulse(t, 150.0)
        })
        .collect();

    let mut engine = Engine::new(MatrixProfileConfig::new(m));
    let mp = engine.ab_join(&ts_a, &ts_b)?;

    println!("Series A length: {}", ts_a.len());
    println!("Series B length: {}", ts_b.len());
    println!("AB-join profile length: {}", mp.len());

    if let Some((j, d)) = mp
        .profile
        .iter()
        .copied()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
    {
        println!("\nClosest window of B: {j}");
        if let Some(i) = mp.neighbor(j) {
            println!("  Matched by window of A at {i}");
        }
        println!("  Distance: {d:.6}");
    }

    Ok(())
}
