use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use viterbi_align::{CostGrid, ForcedAligner};

fn random_grid(rng: &mut StdRng, frames: usize, states: usize) -> CostGrid {
    let values = (0..frames * states).map(|_| rng.gen_range(0.0..10.0)).collect();
    CostGrid::from_flat(frames, states, values).unwrap()
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("forced_align");
    for &(frames, positions) in &[(1_000usize, 20usize), (10_000, 200), (50_000, 1_000)] {
        let mut rng = StdRng::seed_from_u64(44);
        let grid = random_grid(&mut rng, frames, 48);
        let transcript: Vec<usize> = (0..positions).map(|_| rng.gen_range(0..48)).collect();
        group.bench_function(format!("frames_{frames}_positions_{positions}"), |b| {
            b.iter_batched(
                || ForcedAligner::new(&grid, transcript.clone()).unwrap(),
                |aligner| {
                    let result = aligner.run().unwrap();
                    black_box(result.cost());
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_forward_only(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(45);
    let grid = random_grid(&mut rng, 20_000, 32);
    let transcript: Vec<usize> = (0..500).map(|_| rng.gen_range(0..32)).collect();
    let aligner = ForcedAligner::new(&grid, transcript).unwrap();
    c.bench_function("forward_20000x500", |b| {
        b.iter(|| black_box(aligner.forward().terminal_cost()))
    });
}

criterion_group!(benches, bench_align, bench_forward_only);
criterion_main!(benches);
