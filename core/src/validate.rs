//! Schema validation.
//!
//! Reports structural problems that make analysis results misleading:
//! dependencies that mention attributes outside the universe, repeated
//! dependencies, and trivial ones. Validation is advisory. The analysis
//! engines never run it implicitly.
//!
//! # Examples
//!
//! ```
//! use relnorm_core::*;
//!
//! let schema = Schema::parse("A, B", "A -> B").unwrap();
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Z is not part of the universe
//! let schema = Schema::parse("A, B", "A -> Z").unwrap();
//! assert!(!validate_schema(&schema).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::Schema;

/// Schema validation problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A dependency mentions an attribute that is not in the universe.
    #[error("unknown attribute '{attribute}' in dependency {dependency}")]
    UnknownAttribute {
        attribute: String,
        dependency: String,
    },
    /// The same dependency appears more than once.
    #[error("duplicate dependency: {0}")]
    DuplicateDependency(String),
    /// A dependency whose right side is contained in its left side.
    #[error("trivial dependency: {0}")]
    TrivialDependency(String),
}

/// Validates a schema, returning every problem found in dependency order.
///
/// # Examples
///
/// ```
/// use relnorm_core::*;
///
/// let schema = Schema::parse("A, B", "A -> B\nB -> A\nA -> B").unwrap();
/// let errors = validate_schema(&schema);
/// assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicateDependency(_))));
/// ```
pub fn validate_schema(schema: &Schema) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for fd in schema.dependencies() {
        for attribute in &fd.attributes() {
            if !schema.attributes().contains(attribute.as_str()) {
                errors.push(ValidationError::UnknownAttribute {
                    attribute: attribute.to_string(),
                    dependency: fd.to_string(),
                });
            }
        }

        if !seen.insert(fd) {
            errors.push(ValidationError::DuplicateDependency(fd.to_string()));
        }

        if fd.is_trivial() {
            errors.push(ValidationError::TrivialDependency(fd.to_string()));
        }
    }

    errors
}
