use matprof::algorithms::common::sliding_dot_product_naive;
use matprof::{
    distance_profile, movstd, sliding_dot_product, stamp, stmp, z_normalize, ProfileError,
};
use proptest::prelude::*;

fn series_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0f64..100.0, min_len..max_len)
}

/// Every window spans at least `0.01`, so no window is flat to within
/// cumulative-sum rounding.
fn windows_vary(ts: &[f64], m: usize) -> bool {
    ts.windows(m).all(|w| {
        let (lo, hi) = w
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        hi - lo > 0.01
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn movstd_has_one_entry_per_window(ts in series_strategy(3, 200), m in 2usize..40) {
        prop_assume!(m < ts.len());
        let sd = movstd(&ts, m).unwrap();
        prop_assert_eq!(sd.len(), ts.len() - m + 1);
        prop_assert!(sd.iter().all(|&s| s >= 0.0 && s.is_finite()));
    }

    #[test]
    fn movstd_of_constant_series_is_zero(value in -1e3f64..1e3, n in 3usize..100, m in 2usize..20) {
        prop_assume!(m < n);
        let sd = movstd(&vec![value; n], m).unwrap();
        prop_assert!(sd.iter().all(|&s| s.abs() < 1e-9), "{:?}", sd);
    }

    #[test]
    fn z_normalize_has_zero_mean_unit_std(ts in series_strategy(2, 100)) {
        prop_assume!(ts.iter().any(|&x| x != ts[0]));
        let z = z_normalize(&ts).unwrap();
        let n = z.len() as f64;
        let mean = z.iter().sum::<f64>() / n;
        let var = z.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        prop_assert!(mean.abs() < 1e-9);
        prop_assert!((var - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sliding_dot_product_fails_exactly_outside_bounds(ts in series_strategy(1, 80), m in 0usize..50) {
        let m = m.min(ts.len());
        let q = &ts[..m];
        let result = sliding_dot_product(q, &ts);
        if m < 2 {
            prop_assert_eq!(result.unwrap_err(), ProfileError::QueryTooShort { m });
        } else if 2 * m >= ts.len() {
            prop_assert_eq!(result.unwrap_err(), ProfileError::QueryTooLong { m, n: ts.len() });
        } else {
            let fft = result.unwrap();
            let naive = sliding_dot_product_naive(q, &ts);
            prop_assert_eq!(fft.len(), ts.len() - m + 1);
            let scale = q.iter().map(|x| x * x).sum::<f64>().max(1.0);
            for (a, b) in fft.iter().zip(&naive) {
                prop_assert!((a - b).abs() < 1e-9 * scale * ts.len() as f64);
            }
        }
    }

    #[test]
    fn distance_profile_masks_only_the_exclusion_window(
        ts in series_strategy(20, 120),
        m in 2usize..10,
        idx_seed in any::<prop::sample::Index>(),
    ) {
        prop_assume!(2 * m < ts.len());
        prop_assume!(windows_vary(&ts, m));
        let n_subs = ts.len() - m + 1;
        let idx = idx_seed.index(n_subs);
        let dp = distance_profile(&ts, None, m, idx).unwrap();

        prop_assert_eq!(dp.len(), n_subs);
        let zone = m / 2;
        for (j, &d) in dp.iter().enumerate() {
            if j + zone >= idx && j < idx + zone {
                prop_assert!(d.is_infinite(), "offset {} inside zone around {}", j, idx);
            } else {
                prop_assert!(d.is_finite() && d >= 0.0, "offset {}: {}", j, d);
            }
        }
    }

    #[test]
    fn stamp_with_full_sample_equals_stmp(ts in series_strategy(20, 100), m in 3usize..9) {
        prop_assume!(2 * m < ts.len());
        prop_assume!(windows_vary(&ts, m));
        let exact = stmp(&ts, None, m).unwrap();
        let approx = stamp(&ts, None, m, 1.0).unwrap();
        prop_assert_eq!(exact.len(), approx.len());
        for (a, b) in exact.profile.iter().zip(&approx.profile) {
            prop_assert!((a - b).abs() < 1e-9);
        }
    }
}
