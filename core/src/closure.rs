//! Attribute closure under a set of functional dependencies.
//!
//! [`closure`] is the primitive every other analysis is built on. It runs a
//! fixpoint: repeatedly fire each dependency whose left side is already
//! covered, until a full pass adds nothing.

use tracing::trace;

use crate::error::{AnalysisError, Result};
use crate::types::{AttributeSet, FunctionalDependency};

/// Computes the closure of `attributes` under `dependencies`.
///
/// Each productive pass adds at least one attribute drawn from some right
/// side, so the loop stops after at most (total right-side attributes + 1)
/// passes. Running past that bound means the fixpoint logic itself is
/// broken, and is reported as [`AnalysisError::IterationBoundExceeded`].
///
/// # Examples
///
/// ```
/// use relnorm_core::{closure, parse_attributes, parse_dependencies};
///
/// let fds = parse_dependencies("A, B -> C\nC -> B").unwrap();
/// let start = parse_attributes("A, C").unwrap();
/// assert_eq!(closure(&start, &fds).unwrap().to_string(), "{A, B, C}");
/// ```
pub fn closure(
    attributes: &AttributeSet,
    dependencies: &[FunctionalDependency],
) -> Result<AttributeSet> {
    let limit = pass_limit(dependencies);
    let mut result = attributes.clone();
    let mut passes = 0usize;

    loop {
        if passes >= limit {
            return Err(AnalysisError::IterationBoundExceeded {
                operation: "closure fixpoint",
                limit,
            });
        }
        passes += 1;

        let mut changed = false;
        for fd in dependencies {
            if fd.left().is_subset(&result) && !fd.right().is_subset(&result) {
                result.extend(fd.right().iter().cloned());
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    trace!(start = %attributes, closure = %result, passes, "Computed closure");
    Ok(result)
}

/// Returns `true` if `candidate` determines exactly the whole `universe`.
///
/// A closure that reaches attributes outside the universe does not count:
/// such a schema has dependencies that escape its own relation.
pub fn is_superkey(
    candidate: &AttributeSet,
    universe: &AttributeSet,
    dependencies: &[FunctionalDependency],
) -> Result<bool> {
    Ok(closure(candidate, dependencies)? == *universe)
}

fn pass_limit(dependencies: &[FunctionalDependency]) -> usize {
    dependencies
        .iter()
        .map(|fd| fd.right().len())
        .sum::<usize>()
        + 1
}
