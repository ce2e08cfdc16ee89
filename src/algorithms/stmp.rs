use tracing::{debug, trace};

use crate::algorithms::common::validate_query_len;
use crate::algorithms::mass::distance_profile_with;
use crate::core::error::{ProfileError, Result};
use crate::core::fourier::FourierTransform;
use crate::core::matrix_profile::{MatrixProfile, MatrixProfileConfig};
use crate::transforms::real_fft::RealFft;

/// Minimum number of query offsets before dispatching to the parallel path.
/// Below this threshold, thread-dispatch overhead exceeds parallelism gains.
#[cfg(feature = "parallel")]
pub(crate) const MIN_PARALLEL_SUBS: usize = 256;

/// Distance profiles computed concurrently per thread before folding.
#[cfg(feature = "parallel")]
const PARALLEL_BATCH_PER_THREAD: usize = 4;

/// Compute the exact matrix profile with STMP.
///
/// With `b = None` this is a self-join of `a`. With `b = Some(..)` every
/// window of `b` is matched against queries drawn from `a`, and the profile
/// has one entry per window of `b`.
///
/// With the `parallel` feature, large inputs compute distance profiles on the
/// rayon pool; they are still folded in offset order, so the result is
/// identical to the serial path.
pub fn stmp(a: &[f64], b: Option<&[f64]>, m: usize) -> Result<MatrixProfile> {
    let config = MatrixProfileConfig::new(m);

    #[cfg(feature = "parallel")]
    {
        let (mut mp, n_subs) = init_profile(a, b, &config)?;
        if n_subs >= MIN_PARALLEL_SUBS {
            let offsets: Vec<usize> = (0..n_subs).collect();
            fold_offsets_parallel(a, b, &config, &offsets, &mut mp)?;
            return Ok(mp);
        }
    }

    stmp_with(&mut RealFft::new(), a, b, &config)
}

/// [`stmp`] with a caller-supplied FFT backend and configuration (serial).
pub fn stmp_with<F: FourierTransform>(
    fft: &mut F,
    a: &[f64],
    b: Option<&[f64]>,
    config: &MatrixProfileConfig,
) -> Result<MatrixProfile> {
    let (mut mp, n_subs) = init_profile(a, b, config)?;
    debug!(m = config.m, n_subs, self_join = b.is_none(), "computing STMP");

    let offsets: Vec<usize> = (0..n_subs).collect();
    fold_offsets(fft, a, b, config, &offsets, &mut mp)?;

    debug!(n_subs, "STMP complete");
    Ok(mp)
}

/// Validate the inputs and allocate an all-infinity profile.
///
/// Returns the profile and the number of query offsets to visit.
pub(crate) fn init_profile(
    a: &[f64],
    b: Option<&[f64]>,
    config: &MatrixProfileConfig,
) -> Result<(MatrixProfile, usize)> {
    if a.is_empty() {
        return Err(ProfileError::EmptySeries);
    }
    if matches!(b, Some(series) if series.is_empty()) {
        return Err(ProfileError::EmptySeries);
    }

    let target = b.unwrap_or(a);
    validate_query_len(config.m, target.len())?;

    let n_subs = target.len() - config.m + 1;
    let exclusion_zone = if b.is_none() {
        config.exclusion_zone()
    } else {
        0
    };
    Ok((MatrixProfile::new(n_subs, config.m, exclusion_zone), n_subs))
}

/// Fold the distance profile of every offset in `offsets`, in order.
pub(crate) fn fold_offsets<F: FourierTransform>(
    fft: &mut F,
    a: &[f64],
    b: Option<&[f64]>,
    config: &MatrixProfileConfig,
    offsets: &[usize],
    mp: &mut MatrixProfile,
) -> Result<()> {
    for &i in offsets {
        let dp = distance_profile_with(fft, a, b, i, config)?;
        mp.fold(&dp, i)?;
        trace!(offset = i, "folded distance profile");
    }
    Ok(())
}

/// Parallel counterpart of [`fold_offsets`].
///
/// Offsets are processed in batches: the batch's distance profiles are built
/// concurrently (one FFT planner per worker), then folded sequentially in
/// visiting order.
#[cfg(feature = "parallel")]
pub(crate) fn fold_offsets_parallel(
    a: &[f64],
    b: Option<&[f64]>,
    config: &MatrixProfileConfig,
    offsets: &[usize],
    mp: &mut MatrixProfile,
) -> Result<()> {
    use rayon::prelude::*;

    let batch = (rayon::current_num_threads() * PARALLEL_BATCH_PER_THREAD).max(1);
    debug!(
        m = config.m,
        n_offsets = offsets.len(),
        batch,
        "folding distance profiles in parallel"
    );

    for chunk in offsets.chunks(batch) {
        let profiles: Vec<Vec<f64>> = chunk
            .par_iter()
            .map_init(RealFft::new, |fft, &i| {
                distance_profile_with(fft, a, b, i, config)
            })
            .collect::<Result<_>>()?;
        for (&i, dp) in chunk.iter().zip(&profiles) {
            mp.fold(dp, i)?;
        }
    }
    Ok(())
}
