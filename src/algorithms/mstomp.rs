use std::fmt;

use tracing::{debug, trace};

use crate::algorithms::common::{
    apply_exclusion_zone, distance_from_squared, sliding_dot_product_spectrum, validate_query_len,
};
use crate::core::error::{ProfileError, Result};
use crate::core::fourier::{Complex64, FourierTransform};
use crate::core::matrix_profile::{MatrixProfileConfig, RollingStats, NO_NEIGHBOR};
use crate::transforms::real_fft::RealFft;

/// Multi-dimensional matrix profile result.
///
/// Row `k` of `profile` holds, for every offset, the lowest average distance
/// over the `k + 1` best-agreeing dimensions. The nearest neighbor at each
/// row may differ.
#[derive(Debug, Clone)]
pub struct MultiDimensionalProfile {
    /// Distance profiles: shape (d, n_subs).
    pub profile: Vec<Vec<f64>>,
    /// Index profiles: shape (d, n_subs).
    pub profile_index: Vec<Vec<usize>>,
    /// Number of dimensions.
    pub d: usize,
    /// Subsequence length.
    pub m: usize,
}

/// State for the MSTOMP multi-dimensional matrix profile.
///
/// Owns `k` aligned series of common length `n` together with their rolling
/// statistics and forward spectra, computed once at construction. The
/// `k x (n - m + 1)` profile and index matrices are indexed
/// `[dimension][offset]` and updated in place by [`mstomp`](Self::mstomp).
pub struct KMatrixProfile<F: FourierTransform = RealFft> {
    series: Vec<Vec<f64>>,
    config: MatrixProfileConfig,
    n: usize,
    stats: Vec<RollingStats>,
    spectra: Vec<Vec<Complex64>>,
    profile: Vec<Vec<f64>>,
    profile_index: Vec<Vec<usize>>,
    fft: F,
}

impl<F: FourierTransform> fmt::Debug for KMatrixProfile<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KMatrixProfile")
            .field("dimensions", &self.dimensions())
            .field("n", &self.n)
            .field("config", &self.config)
            .field("profile", &self.profile)
            .field("profile_index", &self.profile_index)
            .finish_non_exhaustive()
    }
}

impl KMatrixProfile<RealFft> {
    /// Validate `series` and allocate an all-infinity profile.
    ///
    /// # Errors
    /// - `EmptyDimensions` if `series` is empty
    /// - `LengthMismatch` if the series differ in length
    /// - `QueryTooShort` / `QueryTooLong` unless `2 <= m` and `2m < n`
    pub fn new(series: Vec<Vec<f64>>, m: usize) -> Result<Self> {
        Self::with_backend(series, MatrixProfileConfig::new(m), RealFft::new())
    }
}

impl<F: FourierTransform> KMatrixProfile<F> {
    /// Like [`KMatrixProfile::new`], with an explicit configuration and FFT backend.
    pub fn with_backend(series: Vec<Vec<f64>>, config: MatrixProfileConfig, mut fft: F) -> Result<Self> {
        let first = series.first().ok_or(ProfileError::EmptyDimensions)?;
        let n = first.len();
        for (dimension, s) in series.iter().enumerate() {
            if s.len() != n {
                return Err(ProfileError::LengthMismatch {
                    dimension,
                    len: s.len(),
                    expected: n,
                });
            }
        }
        if n == 0 {
            return Err(ProfileError::EmptySeries);
        }
        let m = config.m;
        validate_query_len(m, n)?;

        let stats = series
            .iter()
            .map(|s| RollingStats::compute(s, m))
            .collect::<Result<Vec<_>>>()?;
        let spectra = series
            .iter()
            .map(|s| fft.forward(s))
            .collect::<Result<Vec<_>>>()?;

        let k = series.len();
        let n_subs = n - m + 1;
        Ok(Self {
            series,
            config,
            n,
            stats,
            spectra,
            profile: vec![vec![f64::INFINITY; n_subs]; k],
            profile_index: vec![vec![NO_NEIGHBOR; n_subs]; k],
            fft,
        })
    }

    /// Number of dimensions `k`.
    pub fn dimensions(&self) -> usize {
        self.series.len()
    }

    /// Subsequence length.
    pub fn m(&self) -> usize {
        self.config.m
    }

    /// Number of subsequence offsets, `n - m + 1`.
    pub fn len(&self) -> usize {
        self.n - self.config.m + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Matrix profile, `[row][offset]`; row `k` averages `k + 1` dimensions.
    pub fn profile(&self) -> &[Vec<f64>] {
        &self.profile
    }

    /// Profile index, same shape as [`profile`](Self::profile).
    pub fn profile_index(&self) -> &[Vec<usize>] {
        &self.profile_index
    }

    /// Nearest neighbor recorded at (`row`, `offset`), if any.
    pub fn neighbor(&self, row: usize, offset: usize) -> Option<usize> {
        self.profile_index
            .get(row)
            .and_then(|r| r.get(offset))
            .copied()
            .filter(|&idx| idx != NO_NEIGHBOR)
    }

    /// Copy the current profile out as a standalone result.
    pub fn to_profile(&self) -> MultiDimensionalProfile {
        MultiDimensionalProfile {
            profile: self.profile.clone(),
            profile_index: self.profile_index.clone(),
            d: self.dimensions(),
            m: self.config.m,
        }
    }

    /// Compute the multi-dimensional matrix profile.
    ///
    /// For every query offset: per-dimension distance rows are built from the
    /// cached spectra, the exclusion zone is applied, each column is sorted
    /// ascending and replaced by its running mean, and row `k` is folded into
    /// the stored minimum (ties go to the later query offset).
    ///
    /// The profile is reset first, so repeated calls give the same result.
    pub fn mstomp(&mut self) -> Result<()> {
        let k = self.dimensions();
        let n_subs = self.len();
        debug!(k, m = self.config.m, n_subs, "computing MSTOMP");

        for row in &mut self.profile {
            row.fill(f64::INFINITY);
        }
        for row in &mut self.profile_index {
            row.fill(NO_NEIGHBOR);
        }

        let mut dist = vec![vec![0.0; n_subs]; k];
        for idx in 0..n_subs {
            self.cross_correlate(idx, &mut dist)?;
            self.to_distances(idx, &mut dist)?;
            column_wise_sort(&mut dist);
            column_wise_cumsum(&mut dist);

            for ((best_row, index_row), dist_row) in self
                .profile
                .iter_mut()
                .zip(self.profile_index.iter_mut())
                .zip(&dist)
            {
                for ((best, index), &d) in best_row.iter_mut().zip(index_row.iter_mut()).zip(dist_row)
                {
                    if d <= *best {
                        *best = d;
                        *index = idx;
                    }
                }
            }
            trace!(offset = idx, "folded multi-dimensional distance rows");
        }

        debug!(k, n_subs, "MSTOMP complete");
        Ok(())
    }

    /// Sliding dot products of each dimension's window at `idx` against the
    /// whole of that dimension. `dist` must be `k x (n - m + 1)`.
    pub(crate) fn cross_correlate(&mut self, idx: usize, dist: &mut [Vec<f64>]) -> Result<()> {
        let m = self.config.m;
        for ((series, spectrum), row) in self.series.iter().zip(&self.spectra).zip(dist.iter_mut()) {
            let dots = sliding_dot_product_spectrum(&mut self.fft, &series[idx..idx + m], spectrum, self.n)?;
            if dots.len() != row.len() {
                return Err(ProfileError::InvariantViolation {
                    what: "cross-correlation row",
                    expected: row.len(),
                    actual: dots.len(),
                });
            }
            row.copy_from_slice(&dots);
        }
        Ok(())
    }

    /// Convert dot-product rows for query `idx` into z-normalized distances in
    /// place, then mask the self-join exclusion zone.
    fn to_distances(&self, idx: usize, dist: &mut [Vec<f64>]) -> Result<()> {
        let m_f = self.config.m as f64;
        let zone = self.config.exclusion_zone();

        for (stats, row) in self.stats.iter().zip(dist.iter_mut()) {
            let mu_q = stats.mean[idx];
            let sigma_q = stats.std[idx];
            if sigma_q == 0.0 {
                return Err(ProfileError::ZeroStandardDeviation);
            }

            for ((d, &mu_t), &sigma_t) in row.iter_mut().zip(&stats.mean).zip(&stats.std) {
                *d = if sigma_t == 0.0 {
                    f64::INFINITY
                } else {
                    let r = (*d - m_f * mu_q * mu_t) / (m_f * sigma_q * sigma_t);
                    distance_from_squared(2.0 * m_f * (1.0 - r))
                };
            }
            apply_exclusion_zone(row, idx, zone);
        }
        Ok(())
    }
}

/// Sort every column of `dist` ascending, in place.
///
/// `dist` is `[dimension][offset]`; after sorting, row 0 holds the smallest
/// value of each column. Infinities sort last.
pub fn column_wise_sort(dist: &mut [Vec<f64>]) {
    let n_cols = dist.first().map_or(0, Vec::len);
    let mut column = Vec::with_capacity(dist.len());
    for j in 0..n_cols {
        column.clear();
        column.extend(dist.iter().map(|row| row[j]));
        column.sort_by(f64::total_cmp);
        for (row, &v) in dist.iter_mut().zip(&column) {
            row[j] = v;
        }
    }
}

/// Replace each column entry at row `k` by the mean of rows `0..=k`.
///
/// Applied to column-sorted input, row `k` becomes the average distance of
/// the `k + 1` best-agreeing dimensions.
pub fn column_wise_cumsum(dist: &mut [Vec<f64>]) {
    let n_cols = dist.first().map_or(0, Vec::len);
    for j in 0..n_cols {
        let mut running = 0.0;
        for (k, row) in dist.iter_mut().enumerate() {
            running += row[j];
            row[j] = running / (k + 1) as f64;
        }
    }
}
