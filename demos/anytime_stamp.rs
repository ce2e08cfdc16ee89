//! Anytime approximation with STAMP.
//!
//! Runs STAMP with a growing sample fraction and shows how the
//! approximate profile converges to the exact STMP profile.
//!
//! Run with: cargo run --release --example anytime_stamp

use matprof::algorithms::stamp::stamp_with;
use matprof::{stmp, MatrixProfileConfig, ProfileError, RealFft};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ProfileError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let n = 2_000;
    let m = 64;
    let ts: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            (t * 0.05).sin() + 0.3 * (t * 0.31).sin() + 0.1 * ((t * 7.1).sin() * (t * 3.3).cos())
        })
        .collect();

    let exact = stmp(&ts, None, m)?;
    let config = MatrixProfileConfig::new(m);
    let mut fft = RealFft::new();

    println!("{:>8} {:>14} {:>12}", "sample", "mean abs err", "unvisited");
    for sample in [0.01, 0.05, 0.1, 0.25, 0.5, 1.0] {
        let mut rng = StdRng::seed_from_u64(42);
        let approx = stamp_with(&mut fft, &mut rng, &ts, None, sample, &config)?;

        let (err_sum, finite) = approx
            .profile
            .iter()
            .zip(&exact.profile)
            .filter(|(a, _)| a.is_finite())
            .fold((0.0, 0usize), |(sum, count), (a, e)| (sum + (a - e).abs(), count + 1));
        let unvisited = approx.len() - finite;
        let mean_err = if finite > 0 { err_sum / finite as f64 } else { f64::NAN };

        println!("{sample:>8.2} {mean_err:>14.6} {unvisited:>12}");
    }

    Ok(())
}
