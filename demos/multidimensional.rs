//! Multi-dimensional matrix profile (MSTOMP).
//!
//! Three co-evolving series share a pulse in dimensions 0 and 1, while
//! dimension 2 is unrelated. Row k of the result averages the k + 1
//! best-agreeing dimensions, so the motif stands out in rows 0 and 1.
//!
//! Run with: cargo run --release --example multidimensional

use matprof::{KMatrixProfile, ProfileError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ProfileError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let m = 20;
    let n = 300;
    let pulse = |t: f64, scale: f64| {
        scale * ((-(t - 50.0).powi(2) / 20.0).exp() + (-(t - 200.0).powi(2) / 20.0).exp())
    };

    let ts0: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            (t * std::f64::consts::TAU / 50.0).sin() + pulse(t, 2.0)
        })
        .collect();
    let ts1: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            (t * std::f64::consts::TAU / 50.0).cos() + pulse(t, 1.5)
        })
        .collect();
    let ts2: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            (t * 7.1).sin() * (t * 11.3).cos() * 0.5
        })
        .collect();

    let mut kmp = KMatrixProfile::new(vec![ts0, ts1, ts2], m)?;
    kmp.mstomp()?;

    println!("Dimensions: {}", kmp.dimensions());
    println!("Subsequence length: {}", kmp.m());
    println!("Profile length: {}", kmp.len());

    for (k, row) in kmp.profile().iter().enumerate() {
        if let Some((offset, d)) = row
            .iter()
            .copied()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))
        {
            let nn = kmp
                .neighbor(k, offset)
                .map_or_else(|| "-".to_string(), |i| i.to_string());
            println!("  {} dim(s): best offset {offset:>4}, neighbor {nn:>4}, distance {d:.4}", k + 1);
        }
    }

    Ok(())
}
