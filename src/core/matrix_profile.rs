use crate::core::error::{ProfileError, Result};

/// Profile index value for offsets where no neighbor has been recorded yet.
pub const NO_NEIGHBOR: usize = usize::MAX;

/// Relative noise floor of the cumulative sums used by [`RollingStats`].
/// Windows whose running-sum variance falls inside it are recomputed exactly.
const VARIANCE_NOISE: f64 = 1e-12;

/// A window whose exact variance is below this fraction of its own mean
/// square is flat.
const FLAT_WINDOW: f64 = 1e-24;

/// Configuration for matrix profile computation.
#[derive(Debug, Clone)]
pub struct MatrixProfileConfig {
    /// Subsequence length.
    pub m: usize,
    /// Exclusion zone denominator: half-width = m / exclusion_zone_denom.
    /// Default is 2, so a self-join excludes `[idx - m/2, idx + m/2)`.
    pub exclusion_zone_denom: usize,
}

impl MatrixProfileConfig {
    pub fn new(m: usize) -> Self {
        Self {
            m,
            exclusion_zone_denom: 2,
        }
    }

    /// Compute the exclusion zone half-width.
    pub fn exclusion_zone(&self) -> usize {
        self.m / self.exclusion_zone_denom.max(1)
    }
}

/// The matrix profile result.
#[derive(Debug, Clone)]
pub struct MatrixProfile {
    /// Nearest-neighbor distances for each subsequence.
    pub profile: Vec<f64>,
    /// Offset of the query that produced each minimum, or [`NO_NEIGHBOR`].
    pub profile_index: Vec<usize>,
    /// Subsequence length used.
    pub m: usize,
    /// Exclusion zone half-width used (0 for AB-joins).
    pub exclusion_zone: usize,
}

impl MatrixProfile {
    /// Create a new matrix profile initialized to infinity distances.
    pub fn new(n_subs: usize, m: usize, exclusion_zone: usize) -> Self {
        Self {
            profile: vec![f64::INFINITY; n_subs],
            profile_index: vec![NO_NEIGHBOR; n_subs],
            m,
            exclusion_zone,
        }
    }

    pub fn len(&self) -> usize {
        self.profile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profile.is_empty()
    }

    /// Nearest neighbor recorded for offset `j`, if any.
    pub fn neighbor(&self, j: usize) -> Option<usize> {
        self.profile_index
            .get(j)
            .copied()
            .filter(|&idx| idx != NO_NEIGHBOR)
    }

    /// Fold the distance profile of query `query_idx` into the running minimum.
    ///
    /// Ties overwrite: an offset examined later wins over an earlier one with
    /// the exact same distance.
    pub fn fold(&mut self, distance_profile: &[f64], query_idx: usize) -> Result<()> {
        if distance_profile.len() != self.profile.len() {
            return Err(ProfileError::InvariantViolation {
                what: "distance profile",
                expected: self.profile.len(),
                actual: distance_profile.len(),
            });
        }
        for ((best, idx), &d) in self
            .profile
            .iter_mut()
            .zip(self.profile_index.iter_mut())
            .zip(distance_profile)
        {
            if d <= *best {
                *best = d;
                *idx = query_idx;
            }
        }
        Ok(())
    }
}

/// Rolling mean and standard deviation for all subsequences of length `m`.
///
/// Computed in a single pass over cumulative sums and sums-of-squares of the
/// mean-centered series, then differenced at offsets `m` apart. Windows whose
/// variance lands inside the rounding floor of those sums are recomputed
/// exactly, so only genuinely flat windows get `std == 0`.
#[derive(Debug, Clone)]
pub struct RollingStats {
    pub mean: Vec<f64>,
    /// Population standard deviation (denominator `m`).
    pub std: Vec<f64>,
}

impl RollingStats {
    /// Compute rolling statistics for subsequences of length `m`.
    ///
    /// Fails when `m <= 1` or `m >= ts.len()`.
    pub fn compute(ts: &[f64], m: usize) -> Result<Self> {
        if m <= 1 {
            return Err(ProfileError::QueryTooShort { m });
        }
        let n = ts.len();
        if m >= n {
            return Err(ProfileError::QueryTooLong { m, n });
        }
        let n_subs = n - m + 1;

        // Centering keeps a large DC offset out of the running sums.
        let shift = ts.iter().sum::<f64>() / n as f64;
        let mut cumsum = vec![0.0; n + 1];
        let mut cumsum_sq = vec![0.0; n + 1];
        for (i, &x) in ts.iter().enumerate() {
            let c = x - shift;
            cumsum[i + 1] = cumsum[i] + c;
            cumsum_sq[i + 1] = cumsum_sq[i] + c * c;
        }

        let mut mean = Vec::with_capacity(n_subs);
        let mut std = Vec::with_capacity(n_subs);

        let m_f = m as f64;
        for i in 0..n_subs {
            let mu = (cumsum[i + m] - cumsum[i]) / m_f;
            let var = (cumsum_sq[i + m] - cumsum_sq[i]) / m_f - mu * mu;
            // Differenced sums carry rounding proportional to their running
            // total, not to the window.
            let noise = VARIANCE_NOISE * cumsum_sq[i + m] / m_f;
            if var <= noise {
                let (mu, sigma) = window_moments(&ts[i..i + m]);
                mean.push(mu);
                std.push(sigma);
            } else {
                mean.push(shift + mu);
                std.push(var.sqrt());
            }
        }

        Ok(Self { mean, std })
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

/// Two-pass mean and standard deviation of one window, with flat windows
/// snapped to `std == 0`.
fn window_moments(w: &[f64]) -> (f64, f64) {
    let m_f = w.len() as f64;
    let mu = w.iter().sum::<f64>() / m_f;
    let var = w.iter().map(|x| (x - mu) * (x - mu)).sum::<f64>() / m_f;
    let mean_sq = w.iter().map(|x| x * x).sum::<f64>() / m_f;
    if var <= FLAT_WINDOW * mean_sq {
        (mu, 0.0)
    } else {
        (mu, var.sqrt())
    }
}
