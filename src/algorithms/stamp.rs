use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::algorithms::stmp::{fold_offsets, init_profile};
use crate::core::error::{ProfileError, Result};
use crate::core::fourier::FourierTransform;
use crate::core::matrix_profile::{MatrixProfile, MatrixProfileConfig};
use crate::transforms::real_fft::RealFft;

/// Compute an approximate matrix profile with STAMP.
///
/// Visits the query offsets in a uniformly random order and stops after
/// `floor(sample * n_subs)` of them. Folding is the same as [`stmp`], so
/// `sample = 1.0` yields the exact profile values.
///
/// # Errors
/// Fails when `sample` is not in `(0, 1]`, plus every [`stmp`] error.
///
/// [`stmp`]: crate::algorithms::stmp::stmp
pub fn stamp(a: &[f64], b: Option<&[f64]>, m: usize, sample: f64) -> Result<MatrixProfile> {
    let config = MatrixProfileConfig::new(m);
    let mut rng = rand::thread_rng();

    #[cfg(feature = "parallel")]
    {
        use crate::algorithms::stmp::{fold_offsets_parallel, MIN_PARALLEL_SUBS};

        let (order, mut mp) = sample_order(&mut rng, a, b, sample, &config)?;
        if order.len() >= MIN_PARALLEL_SUBS {
            fold_offsets_parallel(a, b, &config, &order, &mut mp)?;
            return Ok(mp);
        }
    }

    stamp_with(&mut RealFft::new(), &mut rng, a, b, sample, &config)
}

/// [`stamp`] with a caller-supplied FFT backend, random source and
/// configuration (serial).
pub fn stamp_with<F, R>(
    fft: &mut F,
    rng: &mut R,
    a: &[f64],
    b: Option<&[f64]>,
    sample: f64,
    config: &MatrixProfileConfig,
) -> Result<MatrixProfile>
where
    F: FourierTransform,
    R: Rng + ?Sized,
{
    let (order, mut mp) = sample_order(rng, a, b, sample, config)?;
    debug!(
        m = config.m,
        n_subs = mp.len(),
        n_sampled = order.len(),
        "computing STAMP"
    );

    fold_offsets(fft, a, b, config, &order, &mut mp)?;

    debug!(n_sampled = order.len(), "STAMP complete");
    Ok(mp)
}

/// Validate inputs, allocate the profile and draw the visiting order.
///
/// The order is the prefix of a random permutation of all query offsets, so
/// no offset is visited twice.
fn sample_order<R: Rng + ?Sized>(
    rng: &mut R,
    a: &[f64],
    b: Option<&[f64]>,
    sample: f64,
    config: &MatrixProfileConfig,
) -> Result<(Vec<usize>, MatrixProfile)> {
    if !(sample > 0.0 && sample <= 1.0) {
        return Err(ProfileError::InvalidSample(sample));
    }
    let (mp, n_subs) = init_profile(a, b, config)?;

    let mut order: Vec<usize> = (0..n_subs).collect();
    order.shuffle(rng);
    order.truncate((n_subs as f64 * sample) as usize);
    Ok((order, mp))
}
