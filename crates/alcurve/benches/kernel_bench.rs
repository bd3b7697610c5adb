//! Criterion benchmarks for the memoizing kernel.
//! Cold runs build a fresh kernel per iteration; hot runs reuse one, so the
//! difference is what the caches save.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p alcurve

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use alcurve::api::{
    random_circle, random_line, random_poly, Kernel, PolyGenCfg, ReplayToken,
};

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct_curve");
    for &degree in &[2u32, 3, 4] {
        let cfg = PolyGenCfg {
            degree,
            ..PolyGenCfg::default()
        };
        let f = random_poly(cfg, ReplayToken::new(41, degree as u64));
        group.bench_with_input(BenchmarkId::new("cold", degree), &f, |b, f| {
            b.iter_batched(
                Kernel::new,
                |k| {
                    let ca = k.construct_curve(f);
                    ca.number_of_status_lines_with_event()
                },
                BatchSize::SmallInput,
            )
        });
        let k = Kernel::new();
        k.construct_curve(&f).number_of_status_lines_with_event();
        group.bench_with_input(BenchmarkId::new("hot", degree), &f, |b, f| {
            b.iter(|| k.construct_curve(f).number_of_status_lines_with_event())
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for i in 0..3u64 {
        let tok = ReplayToken::new(43, i);
        let (line, circle) = (random_line(4, tok), random_circle(4, tok));
        group.bench_with_input(BenchmarkId::new("line_circle", i), &i, |b, _| {
            b.iter_batched(
                Kernel::new,
                |k| {
                    let (l, c) = (k.construct_curve(&line), k.construct_curve(&circle));
                    k.solve(&l, &c).map(|pts| pts.len()).unwrap_or(0)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign_at");
    let k = Kernel::new();
    let circle = k.construct_curve_from_str("x^2 + y^2 - 2").unwrap();
    let diag = k.construct_curve_from_str("y - x").unwrap();
    let through = k.construct_curve_from_str("x^3 - y").unwrap();
    let off = k.construct_curve_from_str("x^2 - 3*y + 1").unwrap();
    // (1, 1) lies on all of circle, diag and through
    let pts = k.solve(&circle, &diag).unwrap();
    let p = pts[1].0.clone();
    group.bench_function("certificate", |b| b.iter(|| k.sign_at(&through, &p)));
    group.bench_function("refinement", |b| b.iter(|| k.sign_at(&off, &p)));
    group.finish();
}

criterion_group!(benches, bench_construct, bench_solve, bench_sign);
criterion_main!(benches);
