//! Read-only view of a finished alignment.

use crate::utils::{run_lengths, transcript_counts};

/// Frames assigned to one grammar position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment<L> {
    /// Grammar position (index into the transcript).
    pub position: usize,
    pub label: L,
    /// First frame of the segment.
    pub start: usize,
    /// Number of frames, always at least one.
    pub frames: usize,
}

impl<L> Segment<L> {
    /// One past the last frame.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.frames
    }
}

#[derive(Clone, Debug)]
pub struct AlignmentResult<L> {
    transcript: Vec<L>,
    positions: Vec<usize>,
    labels: Vec<L>,
    cost: f64,
}

impl<L: Clone + PartialEq> AlignmentResult<L> {
    pub(crate) fn new(transcript: Vec<L>, positions: Vec<usize>, cost: f64) -> Self {
        let labels = positions.iter().map(|&p| transcript[p].clone()).collect();
        Self {
            transcript,
            positions,
            labels,
            cost,
        }
    }

    /// One label per frame, frame 0 included.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<L> {
        self.labels
    }

    /// One grammar position per frame.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Total path cost, T1 at the terminal cell.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn num_frames(&self) -> usize {
        self.positions.len()
    }

    pub fn transcript(&self) -> &[L] {
        &self.transcript
    }

    /// Consecutive equal labels collapsed into `(label, count)` pairs.
    ///
    /// A transcript that repeats a label back to back merges into one run;
    /// use [`segments`](Self::segments) to keep the positions apart.
    pub fn run_lengths(&self) -> Vec<(L, usize)> {
        run_lengths(&self.labels)
    }

    /// Per-position frame spans, one per transcript entry, in order.
    pub fn segments(&self) -> Vec<Segment<L>> {
        let mut out: Vec<Segment<L>> = Vec::with_capacity(self.transcript.len());
        for (frame, &position) in self.positions.iter().enumerate() {
            match out.last_mut() {
                Some(seg) if seg.position == position => seg.frames += 1,
                _ => out.push(Segment {
                    position,
                    label: self.transcript[position].clone(),
                    start: frame,
                    frames: 1,
                }),
            }
        }
        out
    }

    /// Frames per transcript entry, counted greedily along the label
    /// sequence.
    ///
    /// Matches the counting the reporting tools have always printed: each
    /// transcript label consumes the leading run of equal labels, so a label
    /// repeated back to back reports every frame on its first occurrence and
    /// zero on the second.
    pub fn counts_for(&self, transcript: &[L]) -> Vec<(L, usize)> {
        transcript_counts(&self.labels, transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> AlignmentResult<char> {
        AlignmentResult::new(vec!['a', 'a', 'b'], vec![0, 0, 1, 1, 1, 2], -3.5)
    }

    #[test]
    fn labels_follow_positions() {
        let r = result();
        assert_eq!(r.labels(), &['a', 'a', 'a', 'a', 'a', 'b']);
        assert_eq!(r.num_frames(), 6);
        assert_eq!(r.cost(), -3.5);
    }

    #[test]
    fn run_lengths_merge_repeated_labels() {
        assert_eq!(result().run_lengths(), vec![('a', 5), ('b', 1)]);
    }

    #[test]
    fn segments_keep_positions_apart() {
        let segs = result().segments();
        assert_eq!(segs.len(), 3);
        assert_eq!((segs[0].start, segs[0].frames), (0, 2));
        assert_eq!((segs[1].start, segs[1].frames, segs[1].end()), (2, 3, 5));
        assert_eq!(segs[2].label, 'b');
    }

    #[test]
    fn greedy_counts() {
        let r = result();
        assert_eq!(
            r.counts_for(&['a', 'a', 'b']),
            vec![('a', 5), ('a', 0), ('b', 1)]
        );
    }
}
