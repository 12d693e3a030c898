use std::collections::HashMap;

use crate::emission::EmissionCostProvider;
use crate::engine::ForcedAligner;
use crate::error::{AlignError, Result};
use crate::grammar::Grammar;
use crate::traits::{EmissionSource, StateLabel};
use crate::transition::TransitionModel;

/// Which grid cell seeds the cost of frame 0.
///
/// Every path starts at grammar position 0 on frame 0, so the choice never
/// changes the alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OriginCost {
    /// Emission of the first transcript label at frame 0.
    #[default]
    FirstLabel,
    /// Raw grid cell `[0][0]`. Only valid when the first transcript label
    /// resolves to column 0; otherwise the reported cost would not belong to
    /// the reported path.
    GridOrigin,
}

pub struct ForcedAlignerBuilder<L> {
    transcript: Vec<L>,
    stay_probability: f64,
    label_map: Option<HashMap<L, usize>>,
    origin_cost: OriginCost,
}

impl<L: StateLabel> ForcedAlignerBuilder<L> {
    pub fn new(transcript: Vec<L>) -> Self {
        Self {
            transcript,
            stay_probability: TransitionModel::DEFAULT_STAY_PROBABILITY,
            label_map: None,
            origin_cost: OriginCost::default(),
        }
    }
    pub fn with_stay_probability(mut self, stay_probability: f64) -> Self {
        self.stay_probability = stay_probability;
        self
    }
    pub fn with_label_map(mut self, label_map: HashMap<L, usize>) -> Self {
        self.label_map = Some(label_map);
        self
    }
    pub fn with_origin_cost(mut self, origin_cost: OriginCost) -> Self {
        self.origin_cost = origin_cost;
        self
    }

    /// Validate every input against `source` and produce a ready session.
    ///
    /// Checks, in order: non-empty transcript, stay probability, at least two
    /// frames, label map bounds, every label resolvable, the grid-origin
    /// precondition, and enough frames for the transcript (one advance per
    /// frame at most).
    pub fn build<S: EmissionSource>(self, source: S) -> Result<ForcedAligner<S, L>> {
        let grammar = Grammar::new(self.transcript)?;
        let transitions = TransitionModel::new(self.stay_probability)?;

        let frames = source.num_frames();
        if frames < 2 {
            return Err(AlignError::shape(format!(
                "cost grid needs at least 2 frames, got {frames}"
            )));
        }

        let provider = EmissionCostProvider::new(source, self.label_map)?;
        let columns = provider.resolve_columns(grammar.states())?;
        if self.origin_cost == OriginCost::GridOrigin && columns[0] != 0 {
            return Err(AlignError::OriginColumn { column: columns[0] });
        }

        if frames < grammar.len() {
            return Err(AlignError::TranscriptTooLong {
                positions: grammar.len(),
                frames,
            });
        }

        Ok(ForcedAligner::from_parts(
            provider,
            transitions,
            grammar,
            columns,
            self.origin_cost,
        ))
    }
}
