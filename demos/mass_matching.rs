//! Pattern search with MASS.
//!
//! Embeds a Gaussian pulse four times in low-amplitude noise, then uses
//! the distance profile of one occurrence to locate the others.
//!
//! Run with: cargo run --release --example mass_matching

use matprof::{mass, ProfileError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ProfileError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let n = 1000;
    let m = 50;
    let mut ts: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            ((t * 7.1).sin() * (t * 11.3).cos()) * 0.1
        })
        .collect();

    let pulse_centers = [100, 350, 600, 850];
    for &center in &pulse_centers {
        for j in 0..m {
            let offset = j as f64 - 25.0;
            ts[center + j] += 2.0 * (-offset * offset / 30.0).exp();
        }
    }

    let query = ts[pulse_centers[0]..pulse_centers[0] + m].to_vec();
    let dp = mass(&query, &ts)?;

    let threshold = 2.0;
    let mut matches: Vec<(usize, f64)> = Vec::new();
    for (i, &d) in dp.iter().enumerate() {
        if d > threshold {
            continue;
        }
        // keep only the best offset within one window length
        match matches.last_mut() {
            Some((j, best)) if i < *j + m => {
                if d < *best {
                    *j = i;
                    *best = d;
                }
            }
            _ => matches.push((i, d)),
        }
    }

    println!("Query length: {m}");
    println!("Matches below {threshold}:");
    for (i, d) in matches {
        println!("  offset {i:>4}: distance {d:.6}");
    }

    Ok(())
}
