pub mod algorithms;
pub mod core;
pub mod transforms;

pub use crate::algorithms::common::sliding_dot_product;
pub use crate::algorithms::mass::{distance_profile, mass};
pub use crate::algorithms::mstomp::{KMatrixProfile, MultiDimensionalProfile};
pub use crate::algorithms::normalize::{movstd, z_normalize};
pub use crate::algorithms::stamp::stamp;
pub use crate::algorithms::stmp::stmp;
pub use crate::core::error::{NormalizeError, ProfileError, Result};
pub use crate::core::fourier::{Complex64, FourierTransform};
pub use crate::core::matrix_profile::{
    MatrixProfile, MatrixProfileConfig, RollingStats, NO_NEIGHBOR,
};
pub use crate::transforms::direct_dft::DirectDft;
pub use crate::transforms::real_fft::RealFft;

use crate::algorithms::mass::{distance_profile_with, mass_with};
use crate::algorithms::stamp::stamp_with;
use crate::algorithms::stmp::stmp_with;

/// High-level facade for matrix profile computation, generic over the FFT backend.
///
/// The engine keeps its backend between calls, so repeated work on series of
/// the same length reuses the cached FFT plans.
///
/// # Examples
///
/// ```
/// use matprof::{Engine, MatrixProfileConfig};
///
/// let ts = vec![1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0, 2.0];
/// let mut engine = Engine::new(MatrixProfileConfig::new(4));
/// let mp = engine.stmp(&ts).unwrap();
/// assert_eq!(mp.profile.len(), ts.len() - 4 + 1);
/// assert!(mp.profile[0] < 1e-6);
/// ```
#[derive(Debug)]
pub struct Engine<F: FourierTransform = RealFft> {
    config: MatrixProfileConfig,
    fft: F,
}

impl Engine<RealFft> {
    /// Create a new engine with the given configuration and the default backend.
    pub fn new(config: MatrixProfileConfig) -> Self {
        Self::with_backend(config, RealFft::new())
    }
}

impl<F: FourierTransform> Engine<F> {
    /// Create an engine with an explicit FFT backend.
    pub fn with_backend(config: MatrixProfileConfig, fft: F) -> Self {
        Self { config, fft }
    }

    pub fn config(&self) -> &MatrixProfileConfig {
        &self.config
    }

    /// Z-normalized distance profile of `query` against every window of `ts`.
    ///
    /// The query length is taken from `query`, not from the configuration.
    pub fn mass(&mut self, query: &[f64], ts: &[f64]) -> Result<Vec<f64>> {
        mass_with(&mut self.fft, query, ts)
    }

    /// Distance profile of the window of `a` at `idx`.
    ///
    /// Self-join (with exclusion zone) when `b` is `None`.
    pub fn distance_profile(&mut self, a: &[f64], b: Option<&[f64]>, idx: usize) -> Result<Vec<f64>> {
        distance_profile_with(&mut self.fft, a, b, idx, &self.config)
    }

    /// Exact self-join matrix profile (STMP).
    pub fn stmp(&mut self, ts: &[f64]) -> Result<MatrixProfile> {
        stmp_with(&mut self.fft, ts, None, &self.config)
    }

    /// Exact AB-join: every window of `b` against queries drawn from `a`.
    pub fn ab_join(&mut self, a: &[f64], b: &[f64]) -> Result<MatrixProfile> {
        stmp_with(&mut self.fft, a, Some(b), &self.config)
    }

    /// Approximate self-join matrix profile (STAMP) over a random
    /// `sample` fraction of the query offsets.
    pub fn stamp(&mut self, ts: &[f64], sample: f64) -> Result<MatrixProfile> {
        stamp_with(
            &mut self.fft,
            &mut rand::thread_rng(),
            ts,
            None,
            sample,
            &self.config,
        )
    }

    /// Multi-dimensional matrix profile (MSTOMP) of aligned series.
    pub fn multi_dimensional(&mut self, series: Vec<Vec<f64>>) -> Result<MultiDimensionalProfile> {
        let mut kmp = KMatrixProfile::with_backend(series, self.config.clone(), &mut self.fft)?;
        kmp.mstomp()?;
        Ok(kmp.to_profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> Vec<f64> {
        (0..n).map(|i| (i as f64 * 0.37).sin() + 0.2 * (i as f64 * 0.05).cos()).collect()
    }

    #[test]
    fn test_engine_matches_free_functions() {
        let ts = series(64);
        let mut engine = Engine::new(MatrixProfileConfig::new(6));

        let a = engine.stmp(&ts).unwrap();
        let b = stmp(&ts, None, 6).unwrap();
        assert_eq!(a.profile_index, b.profile_index);

        let dp = engine.distance_profile(&ts, None, 10).unwrap();
        assert_eq!(dp, distance_profile(&ts, None, 6, 10).unwrap());

        let q = &ts[3..9];
        assert_eq!(engine.mass(q, &ts).unwrap(), mass(q, &ts).unwrap());
    }

    #[test]
    fn test_engine_ab_join_and_stamp() {
        let a = series(80);
        let b = series(40);
        let mut engine = Engine::with_backend(MatrixProfileConfig::new(5), DirectDft);

        let join = engine.ab_join(&a, &b).unwrap();
        assert_eq!(join.len(), 36);
        assert_eq!(join.exclusion_zone, 0);
        // b is a prefix of a, so every window has an exact match
        assert!(join.profile.iter().all(|&d| d < 1e-4));

        let approx = engine.stamp(&a, 1.0).unwrap();
        let exact = engine.stmp(&a).unwrap();
        for (x, y) in approx.profile.iter().zip(&exact.profile) {
            assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_engine_multi_dimensional() {
        let base = series(50);
        let scaled = base.iter().map(|v| v * 2.0 + 1.0).collect();
        let mut engine = Engine::new(MatrixProfileConfig::new(7));
        let result = engine.multi_dimensional(vec![base, scaled]).unwrap();
        assert_eq!(result.d, 2);
        assert_eq!(result.m, 7);
        assert_eq!(result.profile[0].len(), 44);
        // Affine copies z-normalize identically, so both rows agree
        for (x, y) in result.profile[0].iter().zip(&result.profile[1]) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_engine_propagates_errors() {
        let mut engine = Engine::new(MatrixProfileConfig::new(10));
        assert_eq!(
            engine.stmp(&series(15)).unwrap_err(),
            ProfileError::QueryTooLong { m: 10, n: 15 }
        );
        assert_eq!(
            engine.multi_dimensional(vec![]).unwrap_err(),
            ProfileError::EmptyDimensions
        );
    }
}
