use crate::algorithms::common::{
    apply_exclusion_zone, distance_from_squared, sliding_dot_product_with, validate_query_len,
    D_SQUARED_THRESHOLD,
};
use crate::algorithms::normalize::{movstd, z_normalize};
use crate::core::error::{ProfileError, Result};
use crate::core::fourier::FourierTransform;
use crate::core::matrix_profile::MatrixProfileConfig;
use crate::transforms::real_fft::RealFft;

/// Compute the z-normalized distance profile for a query against a time series.
///
/// Implements the MASS (Mueen's Algorithm for Similarity Search) algorithm:
/// 1. Z-normalize the query
/// 2. Compute the rolling standard deviation of the time series
/// 3. Compute the sliding dot product of the normalized query against the series
/// 4. Convert to Euclidean distance: `d[i] = sqrt(|2 * (m - QT[i] / std[i])|)`
///
/// Squared distances under [`D_SQUARED_THRESHOLD`] (1e-13) are reported as
/// exactly 0, so any distance below about `3.2e-7` reads as a perfect match.
/// FFT rounding on exact repeats lands in that band.
///
/// Windows of the series with zero standard deviation get distance infinity.
///
/// # Errors
/// Fails when `query.len() < 2`, when `2 * query.len() >= ts.len()`, or when
/// the query is constant.
pub fn mass(query: &[f64], ts: &[f64]) -> Result<Vec<f64>> {
    mass_with(&mut RealFft::new(), query, ts)
}

/// [`mass`] with a caller-supplied FFT backend.
pub fn mass_with<F: FourierTransform>(fft: &mut F, query: &[f64], ts: &[f64]) -> Result<Vec<f64>> {
    let m = query.len();
    validate_query_len(m, ts.len())?;

    let q_norm = z_normalize(query)?;
    let std = movstd(ts, m)?;
    let qt = sliding_dot_product_with(fft, &q_norm, ts)?;

    if std.len() != qt.len() {
        return Err(ProfileError::InvariantViolation {
            what: "sliding dot product",
            expected: std.len(),
            actual: qt.len(),
        });
    }

    // The normalized query sums to zero, so QT / std equals m * r where r is
    // the Pearson correlation with each window.
    let m_f = m as f64;
    let profile = qt
        .iter()
        .zip(&std)
        .map(|(&dot, &sigma)| {
            if sigma == 0.0 {
                f64::INFINITY
            } else {
                distance_from_squared(2.0 * (m_f - dot / sigma))
            }
        })
        .collect();

    Ok(profile)
}

/// Distance profile of the subsequence `a[idx..idx + m]`.
///
/// With `b = None` this is a self-join against `a`, and the exclusion zone
/// `[idx - m/2, idx + m/2)` is set to infinity to suppress trivial matches.
/// With `b = Some(..)` the query is searched in `b` and nothing is excluded.
pub fn distance_profile(a: &[f64], b: Option<&[f64]>, m: usize, idx: usize) -> Result<Vec<f64>> {
    distance_profile_with(&mut RealFft::new(), a, b, idx, &MatrixProfileConfig::new(m))
}

/// [`distance_profile`] with a caller-supplied FFT backend and configuration.
pub fn distance_profile_with<F: FourierTransform>(
    fft: &mut F,
    a: &[f64],
    b: Option<&[f64]>,
    idx: usize,
    config: &MatrixProfileConfig,
) -> Result<Vec<f64>> {
    let m = config.m;
    let end = idx
        .checked_add(m)
        .filter(|&end| end <= a.len())
        .ok_or(ProfileError::WindowOutOfRange {
            idx,
            m,
            len: a.len(),
        })?;

    let query = &a[idx..end];
    let mut profile = mass_with(fft, query, b.unwrap_or(a))?;
    if b.is_none() {
        apply_exclusion_zone(&mut profile, idx, config.exclusion_zone());
    }
    Ok(profile)
}
