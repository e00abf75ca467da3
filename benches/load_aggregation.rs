use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ring_sim::{aggregate, aggregate_parallel, IdentifierSampler, VirtualRingBuilder};

fn bench_load_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_aggregation");
    let mut sampler = IdentifierSampler::seeded(0);
    let ring = VirtualRingBuilder::new(100, 4)
        .unwrap()
        .build(&mut sampler)
        .unwrap();

    for num_keys in [1_000usize, 10_000, 100_000, 1_000_000] {
        let keys = sampler.sample(num_keys);
        group.throughput(Throughput::Elements(num_keys as u64));
        group.bench_with_input(BenchmarkId::new("sequential", num_keys), &keys, |b, keys| {
            b.iter(|| std::hint::black_box(aggregate(&ring, keys).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("parallel", num_keys), &keys, |b, keys| {
            b.iter(|| std::hint::black_box(aggregate_parallel(&ring, keys).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load_aggregation,);
criterion_main!(benches);
