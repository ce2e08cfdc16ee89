use crate::core::error::{NormalizeError, Result};
use crate::core::matrix_profile::RollingStats;

/// Z-normalize a series: subtract the mean, divide by the population std.
///
/// A constant series fails with [`NormalizeError::ZeroStd`], which carries the
/// mean-centered (all-zero) buffer.
pub fn z_normalize(ts: &[f64]) -> std::result::Result<Vec<f64>, NormalizeError> {
    if ts.is_empty() {
        return Err(NormalizeError::Empty);
    }
    let n_f = ts.len() as f64;
    let mu = ts.iter().sum::<f64>() / n_f;

    let mut out: Vec<f64> = ts.iter().map(|x| x - mu).collect();
    let sigma = (out.iter().map(|x| x * x).sum::<f64>() / n_f).sqrt();
    if sigma == 0.0 {
        return Err(NormalizeError::ZeroStd { centered: out });
    }

    for x in &mut out {
        *x /= sigma;
    }
    Ok(out)
}

/// Rolling population standard deviation over every window of length `m`.
///
/// Returns `ts.len() - m + 1` values. Fails when `m <= 1` or `m >= ts.len()`.
pub fn movstd(ts: &[f64], m: usize) -> Result<Vec<f64>> {
    RollingStats::compute(ts, m).map(|stats| stats.std)
}
