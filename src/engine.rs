//! Restricted Viterbi engine.
//!
//! This module implements the two-phase algorithm:
//! 1. A forward pass that fills the cost table T1 and the backpointer table
//!    T2 frame by frame.
//! 2. A traceback that walks T2 from the forced terminal cell (last position,
//!    last frame) back to frame 0, collecting positions into the [`Grammar`].
//!
//! The automaton is strictly left-to-right: between two frames a position
//! either stays or advances by one. Each cell therefore has at most two
//! candidate predecessors and a frame costs O(K) work instead of the O(K²)
//! of a general Viterbi step.

use crate::builder::{ForcedAlignerBuilder, OriginCost};
use crate::emission::EmissionCostProvider;
use crate::error::{AlignError, Result};
use crate::grammar::Grammar;
use crate::lattice::Lattice;
use crate::result::AlignmentResult;
use crate::traits::{EmissionSource, StateLabel};
use crate::transition::{Transition, TransitionModel};

/// One decoding session: emission costs, transition costs and a transcript.
///
/// Typical usage:
/// ```
/// use viterbi_align::{CostGrid, ForcedAligner};
///
/// let grid = CostGrid::from_rows(&[
///     [-1.0, -2.0, -3.0],
///     [-2.0, -1.0, -3.0],
///     [-4.0, -2.0, -1.0],
///     [-1.0, -4.0, -2.0],
/// ])
/// .unwrap();
/// let result = ForcedAligner::new(&grid, vec![1usize, 0, 2]).unwrap().run().unwrap();
/// assert_eq!(result.labels(), &[1, 0, 0, 2]);
/// ```
///
/// [`run`](Self::run) consumes the session; decode again by building a new
/// one.
#[derive(Debug)]
pub struct ForcedAligner<S, L> {
    provider: EmissionCostProvider<S, L>,
    transitions: TransitionModel,
    grammar: Grammar<L>,
    columns: Vec<usize>,
    origin_cost: OriginCost,
}

impl<S, L> ForcedAligner<S, L>
where
    S: EmissionSource,
    L: StateLabel,
{
    /// Session with default settings (stay probability 0.5, no label map).
    pub fn new(source: S, transcript: Vec<L>) -> Result<Self> {
        ForcedAlignerBuilder::new(transcript).build(source)
    }

    pub(crate) fn from_parts(
        provider: EmissionCostProvider<S, L>,
        transitions: TransitionModel,
        grammar: Grammar<L>,
        columns: Vec<usize>,
        origin_cost: OriginCost,
    ) -> Self {
        Self {
            provider,
            transitions,
            grammar,
            columns,
            origin_cost,
        }
    }

    pub fn transitions(&self) -> &TransitionModel {
        &self.transitions
    }

    pub fn grammar(&self) -> &Grammar<L> {
        &self.grammar
    }

    pub fn origin_cost(&self) -> OriginCost {
        self.origin_cost
    }

    pub fn num_frames(&self) -> usize {
        self.provider.num_frames()
    }

    fn base_cost(&self) -> f64 {
        match self.origin_cost {
            OriginCost::FirstLabel => self.provider.cost_at(0, self.columns[0]),
            // the builder only accepts this policy when columns[0] == 0
            OriginCost::GridOrigin => self.provider.cost_at(0, 0),
        }
    }

    /// Forward pass: fill T1 and T2 for every frame.
    ///
    /// Frame 0 is pinned to position 0. For later frames each position picks
    /// the cheaper of "advance from `k - 1`" and "stay at `k`"; an exact tie
    /// goes to the smaller index, `k - 1`.
    pub fn forward(&self) -> Lattice {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!(
            "forward",
            frames = self.num_frames(),
            positions = self.grammar.len()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let positions = self.grammar.len();
        let frames = self.num_frames();
        let stay = self.transitions.cost(Transition::Stay);
        let advance = self.transitions.cost(Transition::Advance);

        let mut lattice = Lattice::new(positions, frames);
        lattice.set(0, 0, self.base_cost(), 0);

        for f in 1..frames {
            for (k, &column) in self.columns.iter().enumerate() {
                let emit = self.provider.cost_at(f, column);
                let stay_total = lattice.cost(k, f - 1) + stay + emit;
                let (best, from) = if k == 0 {
                    (stay_total, 0)
                } else {
                    let advance_total = lattice.cost(k - 1, f - 1) + advance + emit;
                    if advance_total <= stay_total {
                        (advance_total, k - 1)
                    } else {
                        (stay_total, k)
                    }
                };
                lattice.set(k, f, best, from);
            }
        }

        lattice
    }

    /// Run both passes and read out the alignment.
    ///
    /// Fails with [`AlignError::Unreachable`] when the terminal cell has
    /// infinite cost, i.e. the grid gives every admissible path an impossible
    /// emission.
    pub fn run(mut self) -> Result<AlignmentResult<L>> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "viterbi_align",
            frames = self.num_frames(),
            positions = self.grammar.len()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();
        #[cfg(feature = "tracing")]
        let started = std::time::Instant::now();

        let lattice = self.forward();
        let cost = lattice.terminal_cost();
        if !cost.is_finite() {
            return Err(AlignError::Unreachable { cost });
        }

        traceback(&lattice, &mut self.grammar)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            cost,
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            "alignment finished"
        );

        let (transcript, positions) = self.grammar.into_parts();
        Ok(AlignmentResult::new(transcript, positions, cost))
    }
}

/// Walk the backpointers of `lattice` into `grammar`.
///
/// The last frame is forced to the terminal position; each earlier frame
/// takes the predecessor recorded in the following frame's backpointer row.
/// The grammar ends up holding one position per frame in chronological
/// order. A grammar that already holds a path is rejected with
/// [`AlignError::TracebackFilled`].
pub fn traceback<L: Clone>(lattice: &Lattice, grammar: &mut Grammar<L>) -> Result<()> {
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!("traceback", frames = lattice.num_frames());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    if lattice.num_positions() != grammar.len() {
        return Err(AlignError::shape(format!(
            "lattice has {} positions, grammar has {}",
            lattice.num_positions(),
            grammar.len()
        )));
    }
    if !grammar.framewise_positions().is_empty() {
        return Err(AlignError::TracebackFilled {
            len: grammar.framewise_positions().len(),
        });
    }
    if lattice.num_frames() == 0 {
        return Ok(());
    }

    grammar.set_framewise_state(None)?;
    for f in (1..lattice.num_frames()).rev() {
        grammar.set_framewise_state(Some(lattice.backpointer_row(f)))?;
    }
    grammar.reverse();
    Ok(())
}

/// Decode independent sessions on the rayon pool.
///
/// Results come back in input order and match running each session on its
/// own.
#[cfg(feature = "parallel")]
pub fn align_batch<S, L>(aligners: Vec<ForcedAligner<S, L>>) -> Vec<Result<AlignmentResult<L>>>
where
    S: EmissionSource + Send,
    L: StateLabel + Send,
{
    use rayon::prelude::*;

    #[cfg(feature = "tracing")]
    let span = tracing::info_span!("align_batch", sessions = aligners.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    aligners.into_par_iter().map(ForcedAligner::run).collect()
}
