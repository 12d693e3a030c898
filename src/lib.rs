//! Constrained forced alignment by restricted Viterbi decoding.
//!
//! Given a grid of per-frame emission costs (negative log-likelihoods, one
//! row per frame, one column per state) and an ordered transcript of state
//! labels, this crate finds the cheapest monotonic assignment of one
//! transcript position to every frame.
//!
//! ## Core idea
//! 1. The transcript is a strict left-to-right automaton: between two frames
//!    a position either stays or advances by one.
//! 2. Frame 0 is pinned to the first position and the last frame to the last
//!    one, so every transcript entry receives at least one frame.
//! 3. Each cell has two candidate predecessors, so decoding costs O(K·F)
//!    time and space for K transcript entries and F frames.
//!
//! ## Quick start
//! ```
//! use viterbi_align::{CostGrid, ForcedAlignerBuilder};
//!
//! let grid = CostGrid::from_rows(&[
//!     [-1.0, -2.0, -3.0],
//!     [-2.0, -1.0, -3.0],
//!     [-4.0, -2.0, -1.0],
//!     [-1.0, -4.0, -2.0],
//! ])?;
//! let result = ForcedAlignerBuilder::new(vec![1usize, 0, 2])
//!     .with_stay_probability(0.5)
//!     .build(&grid)?
//!     .run()?;
//! assert_eq!(result.labels(), &[1, 0, 0, 2]);
//! assert_eq!(result.run_lengths(), vec![(1, 1), (0, 2), (2, 1)]);
//! # Ok::<(), viterbi_align::AlignError>(())
//! ```
//!
//! Labels that are not integers go through a label → column map
//! ([`ForcedAlignerBuilder::with_label_map`]).
//!
//! ## Features
//! - `tracing` (default): spans around each decoding pass plus a timing event.
//! - `parallel`: `align_batch` decodes independent sessions on rayon.

pub mod builder;
pub mod emission;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod grid;
pub mod lattice;
pub mod result;
pub mod traits;
pub mod transition;
pub mod utils;

pub use crate::builder::{ForcedAlignerBuilder, OriginCost};
#[cfg(feature = "parallel")]
pub use crate::engine::align_batch;
pub use crate::engine::{traceback, ForcedAligner};
pub use crate::error::{AlignError, Result};
pub use crate::grammar::Grammar;
pub use crate::grid::CostGrid;
pub use crate::result::{AlignmentResult, Segment};
pub use crate::traits::{EmissionSource, StateLabel};
pub use crate::transition::{Transition, TransitionModel};
