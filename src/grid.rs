//! Dense emission cost grid.
//!
//! Row-major storage: one row per frame, one column per state. Rows must all
//! have the same width. `+inf` is a legal entry (an impossible emission);
//! `NaN` and `-inf` are rejected at construction.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::{AlignError, Result};
use crate::traits::EmissionSource;

#[derive(Clone, Debug, PartialEq)]
pub struct CostGrid {
    num_frames: usize,
    num_states: usize,
    values: Vec<f64>,
}

impl CostGrid {
    /// Build from a flat row-major buffer of `num_frames * num_states` values.
    pub fn from_flat(num_frames: usize, num_states: usize, values: Vec<f64>) -> Result<Self> {
        let expected = num_frames
            .checked_mul(num_states)
            .ok_or_else(|| AlignError::shape("grid dimensions overflow"))?;
        if values.len() != expected {
            return Err(AlignError::shape(format!(
                "expected {num_frames} x {num_states} = {expected} values, got {}",
                values.len()
            )));
        }
        if let Some(pos) = values
            .iter()
            .position(|v| v.is_nan() || *v == f64::NEG_INFINITY)
        {
            return Err(AlignError::InvalidCost {
                frame: pos / num_states,
                column: pos % num_states,
            });
        }
        Ok(Self {
            num_frames,
            num_states,
            values,
        })
    }

    /// Build from nested rows (frames × states).
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let num_states = rows.first().map_or(0, |r| r.as_ref().len());
        let mut values = Vec::with_capacity(rows.len() * num_states);
        for (frame, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != num_states {
                return Err(AlignError::shape(format!(
                    "row {frame} has {} columns, expected {num_states}",
                    row.len()
                )));
            }
            values.extend_from_slice(row);
        }
        Self::from_flat(rows.len(), num_states, values)
    }

    /// Parse whitespace-separated rows, one frame per line.
    ///
    /// Blank lines and `#` comments are skipped, so the layout written by
    /// `numpy.savetxt` loads unchanged. Commas also separate values.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<f64>> = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|tok| !tok.is_empty())
                .map(|tok| {
                    tok.parse::<f64>()
                        .map_err(|e| AlignError::parse(idx + 1, format!("`{tok}`: {e}")))
                })
                .collect::<Result<Vec<_>>>()?;
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(AlignError::parse(
                        idx + 1,
                        format!("{} columns, expected {}", row.len(), first.len()),
                    ));
                }
            }
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    /// Read and parse a grid from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| AlignError::io("reading cost grid", e))?;
        Self::parse(&text)
    }

    /// Load a grid file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| AlignError::io("opening cost grid", e))?;
        Self::parse(&text)
    }

    /// Costs of one frame, or `None` past the last frame.
    #[inline]
    pub fn row(&self, frame: usize) -> Option<&[f64]> {
        if frame >= self.num_frames {
            return None;
        }
        let start = frame * self.num_states;
        Some(&self.values[start..start + self.num_states])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.num_states.max(1)).take(self.num_frames)
    }
}

impl FromStr for CostGrid {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl EmissionSource for CostGrid {
    #[inline]
    fn num_frames(&self) -> usize {
        self.num_frames
    }

    #[inline]
    fn num_states(&self) -> usize {
        self.num_states
    }

    #[inline]
    fn cost(&self, frame: usize, column: usize) -> f64 {
        self.values[frame * self.num_states + column]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_round_into_flat_storage() {
        let grid = CostGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        assert_eq!(grid.num_frames(), 3);
        assert_eq!(grid.num_states(), 2);
        assert_eq!(grid.cost(2, 1), 6.0);
        assert_eq!(grid.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(grid.rows().count(), 3);
    }

    #[test]
    fn row_past_the_end_is_none() {
        let grid = CostGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(grid.row(2), None);
        assert_eq!(grid.row(usize::MAX), None);
    }

    #[test]
    fn ragged_rows_are_a_shape_mismatch() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            CostGrid::from_rows(&rows),
            Err(AlignError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn nan_is_rejected_with_its_position() {
        let err = CostGrid::from_rows(&[[0.0, 1.0], [f64::NAN, 2.0]]).unwrap_err();
        assert!(matches!(err, AlignError::InvalidCost { frame: 1, column: 0 }));
    }

    #[test]
    fn negative_infinity_is_rejected() {
        let err = CostGrid::from_rows(&[[0.0, f64::NEG_INFINITY]]).unwrap_err();
        assert!(matches!(err, AlignError::InvalidCost { frame: 0, column: 1 }));
    }

    #[test]
    fn infinity_is_allowed() {
        let grid = CostGrid::from_rows(&[[0.0, f64::INFINITY]]).unwrap();
        assert!(grid.cost(0, 1).is_infinite());
    }

    #[test]
    fn parses_savetxt_layout() {
        let text = "# frames x states\n\
                    -1.0 -2.0 -3.0\n\
                    \n\
                    -2.0e0 -1 inf  # trailing comment\n";
        let grid: CostGrid = text.parse().unwrap();
        assert_eq!(grid.num_frames(), 2);
        assert_eq!(grid.num_states(), 3);
        assert_eq!(grid.cost(1, 0), -2.0);
        assert!(grid.cost(1, 2).is_infinite());
    }

    #[test]
    fn parse_reports_line_of_bad_token() {
        let err = CostGrid::parse("1 2\n3 x\n").unwrap_err();
        assert!(matches!(err, AlignError::Parse { line: 2, .. }));
    }

    #[test]
    fn parse_reports_ragged_line() {
        let err = CostGrid::parse("1 2\n3 4 5\n").unwrap_err();
        assert!(matches!(err, AlignError::Parse { line: 2, .. }));
    }

    #[test]
    fn reader_input_matches_parse() {
        let text = "0 1\n2 3\n";
        let a = CostGrid::from_reader(text.as_bytes()).unwrap();
        let b = CostGrid::parse(text).unwrap();
        assert_eq!(a, b);
    }
}
