//! Example: forced alignment of a few transcripts against one cost grid.
//!
//! Run with:
//! `cargo run --example transcript_align`

use std::collections::HashMap;

use viterbi_align::{CostGrid, ForcedAligner, ForcedAlignerBuilder};

fn main() -> Result<(), viterbi_align::AlignError> {
    // 16 frames over 7 states. Each frame has one clearly likely state; this
    // is purely illustrative, real grids come from an acoustic model.
    let favoured = [2, 2, 6, 6, 5, 1, 1, 0, 0, 3, 3, 3, 4, 4, 4, 4];
    let rows: Vec<Vec<f64>> = favoured
        .iter()
        .map(|&best| (0..7).map(|s| if s == best { 0.2 } else { 2.5 }).collect())
        .collect();
    let grid = CostGrid::from_rows(&rows)?;
    println!("grid: {} frames x 7 states", rows.len());

    // Integer labels are their own grid columns.
    let transcript = vec![2usize, 6, 5, 1, 0, 3, 4];
    let result = ForcedAligner::new(&grid, transcript.clone())?.run()?;
    println!("alignment: {:?}", result.labels());
    println!("counts:    {:?}", result.counts_for(&transcript));
    println!("cost:      {:.4}", result.cost());

    // A transcript that revisits states.
    let transcript = vec![2usize, 1, 3, 1, 3];
    let result = ForcedAlignerBuilder::new(transcript.clone())
        .with_stay_probability(0.7)
        .build(&grid)?
        .run()?;
    println!("alignment: {:?}", result.labels());
    println!("counts:    {:?}", result.counts_for(&transcript));

    // Symbolic labels go through a label -> column map.
    let transcript = vec!["a", "b", "c", "b", "c"];
    let map = HashMap::from([("a", 2), ("b", 1), ("c", 3)]);
    let result = ForcedAlignerBuilder::new(transcript)
        .with_label_map(map)
        .build(&grid)?
        .run()?;
    for seg in result.segments() {
        println!(
            "  {:>2}: {} frames {}..{}",
            seg.position,
            seg.label,
            seg.start,
            seg.end()
        );
    }

    Ok(())
}
