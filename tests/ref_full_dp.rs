//! Compare the engine with exhaustive enumeration of every admissible path.

use proptest::prelude::*;
use viterbi_align::{CostGrid, EmissionSource, ForcedAlignerBuilder};

/// Cost of one framewise position path under the decoder's cost model.
fn path_cost(grid: &CostGrid, transcript: &[usize], path: &[usize], p: f64) -> f64 {
    let stay = -p.ln();
    let advance = -(1.0 - p).ln();
    let mut total = grid.cost(0, transcript[path[0]]);
    for f in 1..path.len() {
        let edge = if path[f] == path[f - 1] { stay } else { advance };
        total += edge + grid.cost(f, transcript[path[f]]);
    }
    total
}

/// Minimum over every path that starts at 0, ends at K - 1 and moves by at
/// most one position per frame.
fn brute_force_min(grid: &CostGrid, transcript: &[usize], p: f64) -> f64 {
    fn walk(
        grid: &CostGrid,
        transcript: &[usize],
        p: f64,
        frames: usize,
        path: &mut Vec<usize>,
        best: &mut f64,
    ) {
        let k = transcript.len();
        if path.len() == frames {
            if path[frames - 1] == k - 1 {
                let c = path_cost(grid, transcript, path, p);
                if c < *best {
                    *best = c;
                }
            }
            return;
        }
        let last = *path.last().unwrap();
        for next in [last, last + 1] {
            if next < k {
                path.push(next);
                walk(grid, transcript, p, frames, path, best);
                path.pop();
            }
        }
    }

    let mut best = f64::INFINITY;
    let mut path = vec![0];
    walk(grid, transcript, p, grid.num_frames(), &mut path, &mut best);
    best
}

fn instance() -> impl Strategy<Value = (CostGrid, Vec<usize>, f64)> {
    (2usize..9, 1usize..5)
        .prop_flat_map(|(frames, states)| {
            (
                proptest::collection::vec(-5.0f64..5.0, frames * states),
                proptest::collection::vec(0..states, 1..=frames.min(5)),
                0.05f64..0.95,
                Just((frames, states)),
            )
        })
        .prop_map(|(values, transcript, p, (frames, states))| {
            let grid = CostGrid::from_flat(frames, states, values).unwrap();
            (grid, transcript, p)
        })
}

proptest! {
    #[test]
    fn cost_matches_exhaustive_search((grid, transcript, p) in instance()) {
        let result = ForcedAlignerBuilder::new(transcript.clone())
            .with_stay_probability(p)
            .build(&grid)
            .unwrap()
            .run()
            .unwrap();
        let expected = brute_force_min(&grid, &transcript, p);
        prop_assert!((result.cost() - expected).abs() < 1e-9,
            "engine {} vs exhaustive {}", result.cost(), expected);
    }

    #[test]
    fn reported_cost_is_cost_of_reported_path((grid, transcript, p) in instance()) {
        let result = ForcedAlignerBuilder::new(transcript.clone())
            .with_stay_probability(p)
            .build(&grid)
            .unwrap()
            .run()
            .unwrap();
        let recomputed = path_cost(&grid, &transcript, result.positions(), p);
        prop_assert!((result.cost() - recomputed).abs() < 1e-9);
    }
}
