//! Error types for dependency parsing and analysis.
//!
//! Parsing failures ([`ParseError`]) are kept separate from analysis failures
//! ([`AnalysisError`]) so callers can tell malformed text apart from
//! well-formed input that cannot be analysed. Internal invariant failures
//! surface as [`AnalysisError::IterationBoundExceeded`] and never as a
//! partial result.

use thiserror::Error;

/// Which side of a dependency arrow a parse error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Malformed dependency text.
///
/// Line numbers are 1-based and count blank lines, so they match what the
/// user sees in an editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line has no `->` token.
    #[error("line {line}: missing '->' in dependency \"{text}\"")]
    MissingArrow { line: usize, text: String },
    /// The line has more than one `->` token.
    #[error("line {line}: more than one '->' in dependency \"{text}\"")]
    MultipleArrows { line: usize, text: String },
    /// One side of the arrow has no attributes after trimming.
    #[error("line {line}: {side} side of dependency \"{text}\" has no attributes")]
    EmptySide {
        line: usize,
        side: Side,
        text: String,
    },
}

/// Failures raised by the analysis engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Dependency text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A required input (attribute universe, dependency list, dependency
    /// side) was empty.
    #[error("no {0} supplied")]
    EmptyInput(&'static str),

    /// No subset of the universe determines the whole universe. This only
    /// happens when dependencies reach attributes outside the declared
    /// universe.
    #[error("no candidate key found; check that every dependency only uses declared attributes")]
    NoCandidateKey,

    /// A dependency uses an attribute the relation does not declare.
    #[error("unknown attribute '{attribute}' in dependency {dependency}")]
    UnknownAttribute {
        attribute: String,
        dependency: String,
    },

    /// A fixpoint or decomposition loop ran past its defensive cap. This is
    /// an internal invariant failure, not a property of the input.
    #[error("{operation} exceeded its iteration bound of {limit}")]
    IterationBoundExceeded {
        operation: &'static str,
        limit: usize,
    },
}

/// Convenience alias for results with [`AnalysisError`].
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages_include_line_and_text() {
        let err = ParseError::EmptySide {
            line: 3,
            side: Side::Right,
            text: "A ->".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "line 3: right side of dependency \"A ->\" has no attributes"
        );
    }

    #[test]
    fn test_parse_error_is_transparent_inside_analysis_error() {
        let err: AnalysisError = ParseError::MissingArrow {
            line: 1,
            text: "A B".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "line 1: missing '->' in dependency \"A B\"");
    }

    #[test]
    fn test_unknown_attribute_message_names_dependency() {
        let err = AnalysisError::UnknownAttribute {
            attribute: "Z".to_string(),
            dependency: "{B} → {C, Z}".to_string(),
        };
        assert_eq!(err.to_string(), "unknown attribute 'Z' in dependency {B} → {C, Z}");
    }
}
