//! Benchmarks for Monte Carlo sampling and summarizing.
//!
//! ## Running the benchmarks
//!
//! ```bash
//! cargo bench -p tephra-runner
//! ```
//!
//! ## Benchmarks included
//!
//! - `sample_joint/N` - joint thickness x area draws
//! - `sample_direct/N` - direct volume draws
//! - `summarize/N` - percentiles and descriptive statistics over N samples

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tephra_model::{
    classify, summarize, CleanupVolumeBound, SampleBounds, SampleStatistics, ThicknessRange,
    VolumeSampler,
};

const DRAW_COUNTS: [usize; 3] = [1_000, 10_000, 100_000];

fn joint_bounds() -> SampleBounds {
    SampleBounds::Joint {
        thickness: ThicknessRange { min_mm: 5.0, max_mm: 50.0 },
        area: classify(50.0, 1000.0, 2000.0),
    }
}

fn bench_sampling(c: &mut Criterion) {
    let direct = SampleBounds::Direct {
        volume: CleanupVolumeBound { min: 3510.0, max: 5544.0 },
    };

    for (name, bounds) in [("sample_joint", joint_bounds()), ("sample_direct", direct)] {
        let mut group = c.benchmark_group(name);
        for draws in DRAW_COUNTS {
            let sampler = match VolumeSampler::new(draws) {
                Ok(sampler) => sampler,
                Err(e) => panic!("invalid draw count {}: {}", draws, e),
            };
            group.throughput(Throughput::Elements(draws as u64));
            group.bench_with_input(BenchmarkId::from_parameter(draws), &bounds, |b, bounds| {
                let mut rng = ChaCha8Rng::seed_from_u64(42);
                b.iter(|| black_box(sampler.sample(bounds, &mut rng)))
            });
        }
        group.finish();
    }
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");
    for draws in DRAW_COUNTS {
        let samples = VolumeSampler::new(draws)
            .and_then(|s| s.sample_seeded(&joint_bounds(), 7))
            .unwrap_or_default();
        group.throughput(Throughput::Elements(draws as u64));
        group.bench_with_input(BenchmarkId::from_parameter(draws), &samples, |b, samples| {
            b.iter(|| {
                black_box(summarize(samples, "bench").ok());
                black_box(SampleStatistics::from_samples(samples).ok())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sampling, bench_summarize);
criterion_main!(benches);
