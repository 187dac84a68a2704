//! Text grammar for attribute universes and dependency lists.
//!
//! An attribute universe is one comma-separated line. A dependency list has
//! one dependency per line in the form `LEFT -> RIGHT`, where each side is a
//! single attribute or a comma-separated list:
//!
//! ```text
//! StudentId, CourseId -> Grade
//! CourseId -> Instructor, Room
//! ```
//!
//! Whitespace around tokens and around the arrow is ignored. Blank lines are
//! skipped, and empty tokens left over from stray commas are dropped.
//!
//! # Examples
//!
//! ```
//! use relnorm_core::{parse_attributes, parse_dependencies};
//!
//! let universe = parse_attributes("A, B, , C").unwrap();
//! assert_eq!(universe.len(), 3);
//!
//! let fds = parse_dependencies("A, B -> C\n\nC -> B").unwrap();
//! assert_eq!(fds.len(), 2);
//! assert!(parse_dependencies("A B").is_err());
//! ```

use tracing::trace;

use crate::error::{AnalysisError, ParseError, Result, Side};
use crate::types::{AttributeSet, FunctionalDependency};

/// The arrow token separating the two sides of a dependency.
pub const ARROW: &str = "->";

/// Parses a comma-separated attribute universe.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] if no attribute remains after
/// trimming and dropping empty tokens.
pub fn parse_attributes(text: &str) -> Result<AttributeSet> {
    let attributes = split_attribute_list(text);
    if attributes.is_empty() {
        return Err(AnalysisError::EmptyInput("attributes"));
    }
    Ok(attributes)
}

/// Parses a newline-separated dependency list.
///
/// # Errors
///
/// Returns [`AnalysisError::Parse`] for the first malformed line, or
/// [`AnalysisError::EmptyInput`] if the text holds no dependency at all.
pub fn parse_dependencies(text: &str) -> Result<Vec<FunctionalDependency>> {
    let mut dependencies = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        dependencies.push(parse_dependency_line(line, index + 1)?);
    }

    if dependencies.is_empty() {
        return Err(AnalysisError::EmptyInput("functional dependencies"));
    }

    trace!(count = dependencies.len(), "Parsed dependency list");
    Ok(dependencies)
}

/// Parses a single `LEFT -> RIGHT` line. `line_number` is only used in
/// error messages.
pub(crate) fn parse_dependency_line(
    line: &str,
    line_number: usize,
) -> std::result::Result<FunctionalDependency, ParseError> {
    let text = line.trim();

    let Some((left, right)) = text.split_once(ARROW) else {
        return Err(ParseError::MissingArrow {
            line: line_number,
            text: text.to_string(),
        });
    };
    if right.contains(ARROW) {
        return Err(ParseError::MultipleArrows {
            line: line_number,
            text: text.to_string(),
        });
    }

    let left = split_attribute_list(left);
    if left.is_empty() {
        return Err(ParseError::EmptySide {
            line: line_number,
            side: Side::Left,
            text: text.to_string(),
        });
    }
    let right = split_attribute_list(right);
    if right.is_empty() {
        return Err(ParseError::EmptySide {
            line: line_number,
            side: Side::Right,
            text: text.to_string(),
        });
    }

    Ok(FunctionalDependency::from_sides(left, right))
}

fn split_attribute_list(text: &str) -> AttributeSet {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attributes_trims_and_drops_empty_tokens() {
        let attrs = parse_attributes("  A ,B,, C ,").unwrap();
        assert_eq!(attrs.to_string(), "{A, B, C}");
    }

    #[test]
    fn test_parse_attributes_rejects_blank_input() {
        assert_eq!(
            parse_attributes(" , ,"),
            Err(AnalysisError::EmptyInput("attributes"))
        );
    }

    #[test]
    fn test_parse_dependencies_accepts_lists_and_single_tokens() {
        let fds = parse_dependencies("A,B -> C\n  C->B  \nStudent Id -> Name").unwrap();
        let rendered: Vec<String> = fds.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["{A, B} → {C}", "{C} → {B}", "{Student Id} → {Name}"]
        );
    }

    #[test]
    fn test_parse_dependencies_skips_blank_lines_but_counts_them() {
        let err = parse_dependencies("A -> B\n\n   \nC D").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Parse(ParseError::MissingArrow {
                line: 4,
                text: "C D".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_dependencies_rejects_empty_sides() {
        assert_eq!(
            parse_dependencies("-> B"),
            Err(AnalysisError::Parse(ParseError::EmptySide {
                line: 1,
                side: Side::Left,
                text: "-> B".to_string(),
            }))
        );
        assert_eq!(
            parse_dependencies("A -> , "),
            Err(AnalysisError::Parse(ParseError::EmptySide {
                line: 1,
                side: Side::Right,
                text: "A -> ,".to_string(),
            }))
        );
    }

    #[test]
    fn test_parse_dependencies_rejects_chained_arrows() {
        assert!(matches!(
            parse_dependencies("A -> B -> C"),
            Err(AnalysisError::Parse(ParseError::MultipleArrows { line: 1, .. }))
        ));
    }

    #[test]
    fn test_parse_dependencies_rejects_empty_list() {
        assert_eq!(
            parse_dependencies("\n  \n"),
            Err(AnalysisError::EmptyInput("functional dependencies"))
        );
    }

    #[test]
    fn test_single_arrow_character_is_not_an_arrow() {
        assert!(matches!(
            parse_dependencies("A > B"),
            Err(AnalysisError::Parse(ParseError::MissingArrow { .. }))
        ));
    }
}
