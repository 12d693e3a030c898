//! Reporting helpers over framewise label sequences.

/// Collapse consecutive equal labels into `(label, count)` pairs.
pub fn run_lengths<L: Clone + PartialEq>(labels: &[L]) -> Vec<(L, usize)> {
    let mut out: Vec<(L, usize)> = Vec::new();
    for label in labels {
        match out.last_mut() {
            Some((last, count)) if last == label => *count += 1,
            _ => out.push((label.clone(), 1)),
        }
    }
    out
}

/// Count frames per transcript entry by consuming `labels` from the front.
///
/// Each transcript label takes the leading run of equal labels that remains;
/// a label that does not match the next frame gets a count of zero. Frames
/// left over after the last transcript entry are not reported.
pub fn transcript_counts<L: Clone + PartialEq>(labels: &[L], transcript: &[L]) -> Vec<(L, usize)> {
    let mut rest = labels;
    transcript
        .iter()
        .map(|state| {
            let run = rest.iter().take_while(|l| *l == state).count();
            rest = &rest[run..];
            (state.clone(), run)
        })
        .collect()
}
