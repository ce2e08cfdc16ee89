pub use realfft::num_complex::Complex64;

use crate::core::error::Result;

/// Discrete Fourier transform of real signals.
///
/// This is the only numeric collaborator the cross-correlation code needs.
/// Algorithms are generic over `F: FourierTransform`, so a backend can be
/// swapped without touching the sliding dot product or MSTOMP.
///
/// Implementations may cache plans between calls, hence `&mut self`.
pub trait FourierTransform {
    /// Forward transform of a real signal.
    ///
    /// Returns the `signal.len() / 2 + 1` non-redundant coefficients.
    fn forward(&mut self, signal: &[f64]) -> Result<Vec<Complex64>>;

    /// Inverse transform back to a real sequence of length `len`.
    ///
    /// `spectrum` must hold `len / 2 + 1` coefficients. The output is
    /// unnormalized: callers divide by `len`.
    fn inverse(&mut self, spectrum: &[Complex64], len: usize) -> Result<Vec<f64>>;
}

impl<F: FourierTransform + ?Sized> FourierTransform for &mut F {
    fn forward(&mut self, signal: &[f64]) -> Result<Vec<Complex64>> {
        (**self).forward(signal)
    }

    fn inverse(&mut self, spectrum: &[Complex64], len: usize) -> Result<Vec<f64>> {
        (**self).inverse(spectrum, len)
    }
}
