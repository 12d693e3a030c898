//! Resolution of `(frame, label)` pairs to emission costs.
//!
//! A label reaches its grid column either through an explicit label → column
//! map or, when no map is configured, through
//! [`StateLabel::column_index`]. The map is validated against the grid when
//! the provider is built.

use std::collections::HashMap;

use crate::error::{AlignError, Result};
use crate::traits::{EmissionSource, StateLabel};

#[derive(Debug)]
pub struct EmissionCostProvider<S, L> {
    source: S,
    label_map: Option<HashMap<L, usize>>,
}

impl<S, L> EmissionCostProvider<S, L>
where
    S: EmissionSource,
    L: StateLabel,
{
    /// Wrap `source`, optionally routing labels through `label_map`.
    ///
    /// Fails with [`AlignError::Index`] if any mapped column lies outside the
    /// grid.
    pub fn new(source: S, label_map: Option<HashMap<L, usize>>) -> Result<Self> {
        if let Some(map) = &label_map {
            let width = source.num_states();
            if let Some(&column) = map.values().find(|&&c| c >= width) {
                return Err(AlignError::index("column", column, width));
            }
        }
        Ok(Self { source, label_map })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn num_frames(&self) -> usize {
        self.source.num_frames()
    }

    /// Grid column for `label`.
    pub fn column(&self, label: &L) -> Result<usize> {
        let column = match &self.label_map {
            Some(map) => map.get(label).copied(),
            None => label.column_index(),
        }
        .ok_or_else(|| AlignError::lookup(label))?;
        let width = self.source.num_states();
        if column >= width {
            return Err(AlignError::index("column", column, width));
        }
        Ok(column)
    }

    /// Resolve every transcript label to its column, failing on the first
    /// label that cannot be resolved.
    pub fn resolve_columns(&self, labels: &[L]) -> Result<Vec<usize>> {
        labels.iter().map(|l| self.column(l)).collect()
    }

    /// Emission cost of `label` at `frame`.
    pub fn cost(&self, frame: usize, label: &L) -> Result<f64> {
        let frames = self.source.num_frames();
        if frame >= frames {
            return Err(AlignError::index("frame", frame, frames));
        }
        let column = self.column(label)?;
        Ok(self.source.cost(frame, column))
    }

    /// Cost lookup on an already resolved column. Bounds are the caller's
    /// responsibility.
    #[inline]
    pub(crate) fn cost_at(&self, frame: usize, column: usize) -> f64 {
        self.source.cost(frame, column)
    }
}
