//! Error taxonomy for alignment sessions.
//!
//! Every failure is reported eagerly, at construction time where possible.
//! A failed session is not recoverable: rebuild it with corrected inputs.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = AlignError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("invalid parameter `{name}`: {value} (must lie strictly inside (0, 1))")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("label {label} has no column in the emission grid")]
    Lookup { label: String },

    #[error("{what} index {index} out of bounds (len {len})")]
    Index {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("shape mismatch: {message}")]
    ShapeMismatch { message: String },

    #[error("transcript is empty")]
    EmptyTranscript,

    #[error(
        "transcript of {positions} states cannot be aligned to {frames} frames \
         (at most one advance per frame)"
    )]
    TranscriptTooLong { positions: usize, frames: usize },

    #[error("emission cost at frame {frame}, column {column} is NaN or -inf")]
    InvalidCost { frame: usize, column: usize },

    #[error("grid-origin cost needs the first label on column 0, found column {column}")]
    OriginColumn { column: usize },

    #[error("traceback buffer already holds {len} positions")]
    TracebackFilled { len: usize },

    #[error("terminal state is unreachable (cost {cost})")]
    Unreachable { cost: f64 },

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl AlignError {
    pub(crate) fn lookup(label: impl std::fmt::Debug) -> Self {
        Self::Lookup {
            label: format!("{label:?}"),
        }
    }

    pub(crate) fn index(what: &'static str, index: usize, len: usize) -> Self {
        Self::Index { what, index, len }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }
}

#[cfg(test)]
mod tests {
    use super::AlignError;

    #[test]
    fn lookup_renders_debug_form_of_label() {
        let err = AlignError::lookup("b");
        assert_eq!(err.to_string(), "label \"b\" has no column in the emission grid");
    }

    #[test]
    fn index_message_names_the_axis() {
        let err = AlignError::index("frame", 7, 4);
        assert_eq!(err.to_string(), "frame index 7 out of bounds (len 4)");
    }
}
