//! Transition costs of the left-to-right automaton.
//!
//! Only two edges exist between consecutive frames: stay on the current
//! grammar position, or advance to the next one. Both are derived from a
//! single stay probability `p`.

use crate::error::{AlignError, Result};

/// Edge taken between two consecutive frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Remain at the same grammar position.
    Stay,
    /// Move to the next grammar position.
    Advance,
}

/// Precomputed `-ln p` / `-ln (1 - p)` pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionModel {
    stay_probability: f64,
    stay_cost: f64,
    advance_cost: f64,
}

impl TransitionModel {
    /// Stay probability used when none is configured.
    pub const DEFAULT_STAY_PROBABILITY: f64 = 0.5;

    /// Build from a stay probability strictly inside `(0, 1)`.
    ///
    /// The endpoints would give an infinite cost to one of the edges and are
    /// rejected, as is `NaN`.
    pub fn new(stay_probability: f64) -> Result<Self> {
        if !(stay_probability > 0.0 && stay_probability < 1.0) {
            return Err(AlignError::InvalidParameter {
                name: "stay_probability",
                value: stay_probability,
            });
        }
        Ok(Self {
            stay_probability,
            stay_cost: -stay_probability.ln(),
            advance_cost: -(1.0 - stay_probability).ln(),
        })
    }

    #[inline]
    pub fn cost(&self, transition: Transition) -> f64 {
        match transition {
            Transition::Stay => self.stay_cost,
            Transition::Advance => self.advance_cost,
        }
    }

    pub fn stay_probability(&self) -> f64 {
        self.stay_probability
    }
}

impl Default for TransitionModel {
    fn default() -> Self {
        let p = Self::DEFAULT_STAY_PROBABILITY;
        Self {
            stay_probability: p,
            stay_cost: -p.ln(),
            advance_cost: -(1.0 - p).ln(),
        }
    }
}
