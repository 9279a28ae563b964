use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::{BoardGenerator, GameConfig, Placement, RandomBoardGenerator};

const TIERS: [(&str, u8, u16); 4] = [
    ("classic", 9, 9),
    ("medium", 16, 40),
    ("large", 64, 800),
    ("saturated", 64, 4095),
];

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for (name, size, mines) in TIERS {
        let config = GameConfig::new_unchecked(size, mines);
        for placement in [Placement::Shuffle, Placement::Rejection] {
            group.bench_with_input(
                BenchmarkId::new(format!("{placement:?}"), name),
                &config,
                |b, &config| {
                    let mut seed = 0u64;
                    b.iter(|| {
                        seed += 1;
                        RandomBoardGenerator::from_seed(seed)
                            .with_placement(placement)
                            .generate(black_box(config))
                            .unwrap()
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);
