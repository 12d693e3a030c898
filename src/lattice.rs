//! Cost and backpointer tables filled by the forward pass.
//!
//! Both tables are frame-major: the `K` cells of one frame are contiguous, so
//! the backpointer row of a frame can be handed to the traceback as a slice.

/// Minimal-cost table (T1) and argmin table (T2) of one decoding session.
#[derive(Clone, Debug)]
pub struct Lattice {
    num_positions: usize,
    num_frames: usize,
    costs: Vec<f64>,
    backpointers: Vec<usize>,
}

impl Lattice {
    /// Allocate `num_frames × num_positions` cells at `+inf` with
    /// self-referencing backpointers.
    pub(crate) fn new(num_positions: usize, num_frames: usize) -> Self {
        let cells = num_positions * num_frames;
        let backpointers = (0..cells).map(|i| i % num_positions.max(1)).collect();
        Self {
            num_positions,
            num_frames,
            costs: vec![f64::INFINITY; cells],
            backpointers,
        }
    }

    #[inline]
    pub fn num_positions(&self) -> usize {
        self.num_positions
    }

    #[inline]
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// T1 at `(position, frame)`.
    #[inline]
    pub fn cost(&self, position: usize, frame: usize) -> f64 {
        self.costs[frame * self.num_positions + position]
    }

    /// T2 at `(position, frame)`.
    #[inline]
    pub fn backpointer(&self, position: usize, frame: usize) -> usize {
        self.backpointers[frame * self.num_positions + position]
    }

    /// T1 values of every position at `frame`.
    #[inline]
    pub fn cost_row(&self, frame: usize) -> &[f64] {
        let start = frame * self.num_positions;
        &self.costs[start..start + self.num_positions]
    }

    /// T2 values of every position at `frame`.
    #[inline]
    pub fn backpointer_row(&self, frame: usize) -> &[usize] {
        let start = frame * self.num_positions;
        &self.backpointers[start..start + self.num_positions]
    }

    /// Cost of the forced terminal cell (last position, last frame).
    pub fn terminal_cost(&self) -> f64 {
        self.cost(self.num_positions - 1, self.num_frames - 1)
    }

    #[inline]
    pub(crate) fn set(&mut self, position: usize, frame: usize, cost: f64, backpointer: usize) {
        let idx = frame * self.num_positions + position;
        self.costs[idx] = cost;
        self.backpointers[idx] = backpointer;
    }
}

#[cfg(test)]
mod tests {
    use super::Lattice;

    #[test]
    fn fresh_lattice_is_unreachable_everywhere() {
        let l = Lattice::new(3, 4);
        assert_eq!(l.num_positions(), 3);
        assert_eq!(l.num_frames(), 4);
        assert!(l.cost_row(2).iter().all(|c| c.is_infinite()));
        assert_eq!(l.backpointer_row(1), &[0, 1, 2]);
    }

    #[test]
    fn rows_are_frame_major() {
        let mut l = Lattice::new(2, 3);
        l.set(1, 2, -4.0, 0);
        assert_eq!(l.cost(1, 2), -4.0);
        assert_eq!(l.cost_row(2), &[f64::INFINITY, -4.0]);
        assert_eq!(l.backpointer(1, 2), 0);
        assert_eq!(l.terminal_cost(), -4.0);
    }
}
