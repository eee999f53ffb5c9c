use crate::reference::rayon_integral;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use par_integral::prelude::*;
use std::time::Instant;

#[path = "../tests/reference.rs"]
mod reference;

const BOUNDARY: f64 = 3.0;
const STEPS: u64 = 1_000_000;

fn strategy_benchmark(c: &mut Criterion) {
    let domain = Interval::new(0.0, BOUNDARY);
    for threads in [1, 4, 16] {
        let runner = ParallelRunner::new(CosMinusOneOverX);
        let mut acc = SharedAccumulator::default();
        c.bench_function(&format!("mutex {} threads", threads), |b| {
            b.iter(|| runner.trial(&mut acc, Instant::now(), domain, black_box(STEPS), threads))
        });

        #[cfg(feature = "channel")]
        {
            let runner = ParallelRunner::new(CosMinusOneOverX).with_strategy(Strategy::Channel);
            let mut acc = SharedAccumulator::default();
            c.bench_function(&format!("channel {} threads", threads), |b| {
                b.iter(|| runner.trial(&mut acc, Instant::now(), domain, black_box(STEPS), threads))
            });
        }

        c.bench_function(&format!("rayon {} slices", threads), |b| {
            b.iter(|| rayon_integral(BOUNDARY, black_box(STEPS), threads))
        });
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    strategy_benchmark(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
