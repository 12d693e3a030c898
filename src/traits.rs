//! Core trait definitions for the alignment engine.
//!
//! Two seams let callers plug their own data into the decoder:
//! - [`EmissionSource`]: dense frame × state storage of emission costs.
//! - [`StateLabel`]: how a transcript label resolves to a grid column when no
//!   explicit label → column map is configured.
//!
//! The engine only ever reads through these traits; it never mutates the
//! emission data.

use std::fmt::Debug;
use std::hash::Hash;

/// Read-only access to a grid of emission costs.
///
/// Semantics:
/// - rows are frames, `num_frames()` of them;
/// - columns are model states, `num_states()` of them;
/// - `cost(frame, column)` is a negative log-likelihood (lower is likelier).
///
/// Implementations may assume `frame < num_frames()` and
/// `column < num_states()`; bounds are checked by the caller
/// ([`EmissionCostProvider`](crate::emission::EmissionCostProvider)).
pub trait EmissionSource {
    /// Number of frames (rows).
    fn num_frames(&self) -> usize;

    /// Number of states (columns).
    fn num_states(&self) -> usize;

    /// Emission cost of `column` at `frame`.
    fn cost(&self, frame: usize, column: usize) -> f64;
}

impl<S: EmissionSource + ?Sized> EmissionSource for &S {
    fn num_frames(&self) -> usize {
        (**self).num_frames()
    }
    fn num_states(&self) -> usize {
        (**self).num_states()
    }
    fn cost(&self, frame: usize, column: usize) -> f64 {
        (**self).cost(frame, column)
    }
}

/// A transcript label.
///
/// Integer labels double as grid columns: with no label map configured, the
/// label value itself is the column. Labels without a natural integer value
/// (strings, chars) return `None` and therefore require a map.
pub trait StateLabel: Clone + Eq + Hash + Debug {
    /// Column index this label denotes on its own, if any.
    fn column_index(&self) -> Option<usize> {
        None
    }
}

macro_rules! integer_label {
    ($($t:ty),*) => {$(
        impl StateLabel for $t {
            #[inline]
            fn column_index(&self) -> Option<usize> {
                // negative values never name a column
                usize::try_from(*self).ok()
            }
        }
    )*};
}

integer_label!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl StateLabel for char {}
impl StateLabel for String {}
impl StateLabel for &str {}
