//! Transcript grammar and its traceback buffer.
//!
//! The grammar is the ordered list of transcript labels. During traceback it
//! collects one grammar position per frame, latest frame first; `reverse`
//! turns the buffer into chronological order.

use crate::error::{AlignError, Result};

#[derive(Clone, Debug)]
pub struct Grammar<L> {
    states: Vec<L>,
    framewise: Vec<usize>,
}

impl<L: Clone> Grammar<L> {
    /// Build a grammar over a non-empty transcript.
    pub fn new(states: Vec<L>) -> Result<Self> {
        if states.is_empty() {
            return Err(AlignError::EmptyTranscript);
        }
        Ok(Self {
            states,
            framewise: Vec::new(),
        })
    }

    /// Number of grammar positions `K`.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: an empty transcript is rejected by [`Grammar::new`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[L] {
        &self.states
    }

    /// Append the grammar position for the next (earlier) frame.
    ///
    /// `None` marks the last frame and appends the terminal position `K - 1`;
    /// it starts a traceback, so the buffer must still be empty.
    /// `Some(row)` is the backpointer row of the frame after the one being
    /// appended; the new entry is the predecessor recorded there for the most
    /// recently appended position.
    pub fn set_framewise_state(&mut self, backpointers: Option<&[usize]>) -> Result<()> {
        let position = match backpointers {
            None => {
                if !self.framewise.is_empty() {
                    return Err(AlignError::TracebackFilled {
                        len: self.framewise.len(),
                    });
                }
                self.states.len() - 1
            }
            Some(row) => {
                let last = *self
                    .framewise
                    .last()
                    .ok_or_else(|| AlignError::index("traceback", 0, 0))?;
                *row
                    .get(last)
                    .ok_or_else(|| AlignError::index("backpointer", last, row.len()))?
            }
        };
        self.framewise.push(position);
        Ok(())
    }

    /// Reverse the buffer in place (chronological order, frame 0 first).
    pub fn reverse(&mut self) {
        self.framewise.reverse();
    }

    /// Grammar positions in buffer order.
    pub fn framewise_positions(&self) -> &[usize] {
        &self.framewise
    }

    /// Labels in buffer order, one per frame.
    pub fn framewise_states(&self) -> Vec<L> {
        self.framewise
            .iter()
            .map(|&pos| self.states[pos].clone())
            .collect()
    }

    /// Split into labels and the raw position buffer.
    pub(crate) fn into_parts(self) -> (Vec<L>, Vec<usize>) {
        (self.states, self.framewise)
    }
}
