use crate::core::error::{ProfileError, Result};
use crate::core::fourier::{Complex64, FourierTransform};
use crate::transforms::real_fft::RealFft;

/// Squared distances below this are FFT rounding noise and read as zero.
///
/// Any distance under `sqrt(1e-13) ≈ 3.2e-7` is therefore reported as 0.
pub const D_SQUARED_THRESHOLD: f64 = 1e-13;

/// Check that a query of length `m` may be slid over a series of length `n`.
///
/// The query must hold at least two points and be shorter than half the
/// series.
pub fn validate_query_len(m: usize, n: usize) -> Result<()> {
    if m < 2 {
        return Err(ProfileError::QueryTooShort { m });
    }
    if 2 * m >= n {
        return Err(ProfileError::QueryTooLong { m, n });
    }
    Ok(())
}

/// Element-wise product of two spectra of equal length.
pub fn multiply_spectra(a: &[Complex64], b: &[Complex64]) -> Result<Vec<Complex64>> {
    if a.len() != b.len() {
        return Err(ProfileError::InvariantViolation {
            what: "spectrum",
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}

/// Compute the sliding dot product between query `q` and series `ts`.
///
/// Returns a vector of length `ts.len() - q.len() + 1` where element `i` is
/// `dot(q, ts[i..i+m])`. Uses the default [`RealFft`] backend.
///
/// Fails when `m < 2` or `2m >= n`.
pub fn sliding_dot_product(q: &[f64], ts: &[f64]) -> Result<Vec<f64>> {
    sliding_dot_product_with(&mut RealFft::new(), q, ts)
}

/// [`sliding_dot_product`] with a caller-supplied FFT backend.
pub fn sliding_dot_product_with<F: FourierTransform>(
    fft: &mut F,
    q: &[f64],
    ts: &[f64],
) -> Result<Vec<f64>> {
    validate_query_len(q.len(), ts.len())?;
    let ts_spectrum = fft.forward(ts)?;
    sliding_dot_product_spectrum(fft, q, &ts_spectrum, ts.len())
}

/// Sliding dot product against a series whose forward transform is cached.
///
/// `ts_spectrum` is the forward transform of a series of length `n`. The
/// reversed query is zero-padded to `n`, so the product of the two spectra is
/// a circular convolution; its segment starting at `m - 1` never wraps and
/// holds exactly the `n - m + 1` window dot products.
pub fn sliding_dot_product_spectrum<F: FourierTransform>(
    fft: &mut F,
    q: &[f64],
    ts_spectrum: &[Complex64],
    n: usize,
) -> Result<Vec<f64>> {
    let m = q.len();
    validate_query_len(m, n)?;

    let mut q_padded = vec![0.0; n];
    for (dst, &x) in q_padded.iter_mut().zip(q.iter().rev()) {
        *dst = x;
    }

    let q_spectrum = fft.forward(&q_padded)?;
    let product = multiply_spectra(&q_spectrum, ts_spectrum)?;
    let conv = fft.inverse(&product, n)?;
    if conv.len() != n {
        return Err(ProfileError::InvariantViolation {
            what: "inverse transform",
            expected: n,
            actual: conv.len(),
        });
    }

    let norm = 1.0 / n as f64;
    Ok(conv[m - 1..].iter().map(|&x| x * norm).collect())
}

/// Turn a squared z-normalized distance into a distance.
///
/// The absolute value absorbs tiny negative values left by floating-point
/// cancellation, and anything under [`D_SQUARED_THRESHOLD`] is flushed to 0.
#[inline]
pub fn distance_from_squared(d_squared: f64) -> f64 {
    let d_squared = d_squared.abs();
    if d_squared < D_SQUARED_THRESHOLD {
        0.0
    } else {
        d_squared.sqrt()
    }
}

/// Naive O(n*m) sliding dot product.
///
/// Reference for the FFT path; returns an empty vector when no window fits.
pub fn sliding_dot_product_naive(q: &[f64], ts: &[f64]) -> Vec<f64> {
    let m = q.len();
    if m == 0 || ts.len() < m {
        return Vec::new();
    }
    ts.windows(m)
        .map(|w| q.iter().zip(w).map(|(a, b)| a * b).sum())
        .collect()
}

/// Set the self-join exclusion zone `[idx - zone, idx + zone)` to infinity.
///
/// The zone is clamped to the profile bounds.
#[inline]
pub fn apply_exclusion_zone(profile: &mut [f64], idx: usize, zone: usize) {
    let start = idx.saturating_sub(zone);
    let end = idx.saturating_add(zone).min(profile.len());
    if start < end {
        for val in &mut profile[start..end] {
            *val = f64::INFINITY;
        }
    }
}
