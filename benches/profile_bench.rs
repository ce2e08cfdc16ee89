use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matprof::algorithms::common::{sliding_dot_product, sliding_dot_product_naive};
use matprof::{mass, stamp, stmp, KMatrixProfile, RollingStats};

fn sine(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 * 0.1).sin()).collect()
}

fn bench_sdp_naive_vs_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("sdp_naive_vs_fft");
    let m = 100;
    for n in [500, 1_000, 2_000, 5_000, 10_000] {
        let ts = sine(n);
        let q: Vec<f64> = ts[0..m].to_vec();
        group.bench_with_input(BenchmarkId::new("naive", n), &n, |b, _| {
            b.iter(|| sliding_dot_product_naive(black_box(&q), black_box(&ts)))
        });
        group.bench_with_input(BenchmarkId::new("fft", n), &n, |b, _| {
            b.iter(|| sliding_dot_product(black_box(&q), black_box(&ts)))
        });
    }
    group.finish();
}

fn bench_rolling_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_stats");
    for n in [1_000, 5_000, 10_000] {
        let ts = sine(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| RollingStats::compute(black_box(&ts), 100))
        });
    }
    group.finish();
}

fn bench_mass(c: &mut Criterion) {
    let mut group = c.benchmark_group("mass");
    for n in [1_000, 10_000, 100_000] {
        let ts = sine(n);
        let q: Vec<f64> = ts[10..110].to_vec();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| mass(black_box(&q), black_box(&ts)))
        });
    }
    group.finish();
}

fn bench_stmp(c: &mut Criterion) {
    let mut group = c.benchmark_group("stmp");
    group.sample_size(10);
    for n in [500, 1_000, 2_000] {
        let ts = sine(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| stmp(black_box(&ts), None, 50))
        });
    }
    group.finish();
}

fn bench_stamp_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("stamp_sample");
    group.sample_size(10);
    let ts = sine(2_000);
    for sample in [0.1, 0.25, 0.5, 1.0] {
        group.bench_with_input(BenchmarkId::from_parameter(sample), &sample, |b, &sample| {
            b.iter(|| stamp(black_box(&ts), None, 50, sample))
        });
    }
    group.finish();
}

fn bench_mstomp(c: &mut Criterion) {
    let mut group = c.benchmark_group("mstomp");
    group.sample_size(10);
    let n = 1_000;
    for k in [1, 2, 4, 8] {
        let series: Vec<Vec<f64>> = (0..k)
            .map(|d| (0..n).map(|i| (i as f64 * 0.1 + d as f64).sin()).collect())
            .collect();
        group.bench_with_input(BenchmarkId::new("dims", k), &k, |b, _| {
            b.iter(|| {
                let mut kmp = KMatrixProfile::new(black_box(series.clone()), 50).unwrap();
                kmp.mstomp().unwrap();
                kmp
            })
        });
    }
    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_stmp_thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("stmp_thread_scaling");
    group.sample_size(10);

    let ts = sine(5_000);
    for threads in [1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("threads", threads),
            &threads,
            |b, &threads| {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .unwrap();
                b.iter(|| pool.install(|| stmp(black_box(&ts), None, 100)));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sdp_naive_vs_fft,
    bench_rolling_stats,
    bench_mass,
    bench_stmp,
    bench_stamp_sample,
    bench_mstomp,
);

#[cfg(feature = "parallel")]
criterion_group!(parallel_benches, bench_stmp_thread_scaling);

#[cfg(feature = "parallel")]
criterion_main!(benches, parallel_benches);

#[cfg(not(feature = "parallel"))]
criterion_main!(benches);
