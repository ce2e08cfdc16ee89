use std::f64::consts::TAU;

use crate::core::error::{ProfileError, Result};
use crate::core::fourier::{Complex64, FourierTransform};

/// Direct O(n^2) discrete Fourier transform.
///
/// Slow, but free of planning state and numerically transparent. Useful for
/// short series and as a reference when checking another backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDft;

impl FourierTransform for DirectDft {
    fn forward(&mut self, signal: &[f64]) -> Result<Vec<Complex64>> {
        let n = signal.len();
        let n_bins = n / 2 + 1;
        let n_f = n as f64;

        let spectrum = (0..n_bins)
            .map(|k| {
                signal
                    .iter()
                    .enumerate()
                    .fold(Complex64::new(0.0, 0.0), |acc, (t, &x)| {
                        let angle = -TAU * ((k * t) % n) as f64 / n_f;
                        acc + Complex64::from_polar(x, angle)
                    })
            })
            .collect();
        Ok(spectrum)
    }

    fn inverse(&mut self, spectrum: &[Complex64], len: usize) -> Result<Vec<f64>> {
        let n_bins = len / 2 + 1;
        if spectrum.len() != n_bins {
            return Err(ProfileError::InvariantViolation {
                what: "spectrum",
                expected: n_bins,
                actual: spectrum.len(),
            });
        }
        let n_f = len as f64;

        // Rebuild the Hermitian-symmetric upper half implicitly: every bin
        // strictly between DC and Nyquist appears twice.
        let output = (0..len)
            .map(|t| {
                spectrum
                    .iter()
                    .enumerate()
                    .map(|(k, c)| {
                        let angle = TAU * ((k * t) % len) as f64 / n_f;
                        let term = (c * Complex64::from_polar(1.0, angle)).re;
                        let mirrored = k != 0 && !(len % 2 == 0 && k == len / 2);
                        if mirrored {
                            2.0 * term
                        } else {
                            term
                        }
                    })
                    .sum()
            })
            .collect();
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::real_fft::RealFft;

    #[test]
    fn test_matches_real_fft() {
        let signal: Vec<f64> = (0..9).map(|i| (i as f64 * 1.3).cos() - 0.2).collect();
        let a = DirectDft.forward(&signal).unwrap();
        let b = RealFft::new().forward(&signal).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).norm() < 1e-9, "{x} vs {y}");
        }
    }

    #[test]
    fn test_round_trip_even_and_odd() {
        for n in [6, 7] {
            let signal: Vec<f64> = (0..n).map(|i| i as f64 * 0.5 - 1.0).collect();
            let spectrum = DirectDft.forward(&signal).unwrap();
            let back = DirectDft.inverse(&spectrum, n).unwrap();
            for (a, b) in signal.iter().zip(&back) {
                assert!((a - b / n as f64).abs() < 1e-9);
            }
        }
    }
}
