use std::fmt;

use realfft::RealFftPlanner;

use crate::core::error::{ProfileError, Result};
use crate::core::fourier::{Complex64, FourierTransform};

/// Real-to-complex FFT backed by `realfft`.
///
/// Plans are cached by the planner, so reusing one `RealFft` across many
/// transforms of the same length (as MSTOMP does) only plans once.
pub struct RealFft {
    planner: RealFftPlanner<f64>,
}

impl RealFft {
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::<f64>::new(),
        }
    }
}

impl Default for RealFft {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RealFft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealFft").finish_non_exhaustive()
    }
}

impl FourierTransform for RealFft {
    fn forward(&mut self, signal: &[f64]) -> Result<Vec<Complex64>> {
        let fft = self.planner.plan_fft_forward(signal.len());
        // realfft uses the input as scratch space
        let mut input = signal.to_vec();
        let mut spectrum = fft.make_output_vec();
        fft.process(&mut input, &mut spectrum)
            .map_err(|e| ProfileError::Fourier(e.to_string()))?;
        Ok(spectrum)
    }

    fn inverse(&mut self, spectrum: &[Complex64], len: usize) -> Result<Vec<f64>> {
        let fft = self.planner.plan_fft_inverse(len);
        let mut input = fft.make_input_vec();
        if input.len() != spectrum.len() {
            return Err(ProfileError::InvariantViolation {
                what: "spectrum",
                expected: input.len(),
                actual: spectrum.len(),
            });
        }
        input.copy_from_slice(spectrum);

        // The DC bin (and the Nyquist bin for even lengths) of a real signal
        // is purely real; realfft rejects any residual imaginary part.
        input[0].im = 0.0;
        if len % 2 == 0 {
            if let Some(last) = input.last_mut() {
                last.im = 0.0;
            }
        }

        let mut output = fft.make_output_vec();
        fft.process(&mut input, &mut output)
            .map_err(|e| ProfileError::Fourier(e.to_string()))?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_length() {
        let mut fft = RealFft::new();
        assert_eq!(fft.forward(&[1.0; 8]).unwrap().len(), 5);
        assert_eq!(fft.forward(&[1.0; 7]).unwrap().len(), 4);
    }

    #[test]
    fn test_forward_inverse_recovers_signal() {
        let mut fft = RealFft::new();
        for n in [6, 7, 11, 16] {
            let signal: Vec<f64> = (0..n).map(|i| (i as f64 * 0.7).sin() + 0.3).collect();
            let spectrum = fft.forward(&signal).unwrap();
            let back = fft.inverse(&spectrum, n).unwrap();
            for (a, b) in signal.iter().zip(&back) {
                assert!((a - b / n as f64).abs() < 1e-10, "n={n}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_constant_signal_is_all_dc() {
        let mut fft = RealFft::new();
        let spectrum = fft.forward(&[2.0; 4]).unwrap();
        assert!((spectrum[0].re - 8.0).abs() < 1e-12);
        for c in &spectrum[1..] {
            assert!(c.norm() < 1e-12);
        }
    }

    #[test]
    fn test_inverse_rejects_wrong_spectrum_length() {
        let mut fft = RealFft::new();
        let spectrum = vec![Complex64::new(1.0, 0.0); 3];
        let err = fft.inverse(&spectrum, 8).unwrap_err();
        assert!(matches!(err, ProfileError::InvariantViolation { .. }));
    }
}
