//! Minimal cover construction.
//!
//! [`minimal_cover_with_trace`] runs three passes, each over the full output
//! of the previous one:
//!
//! 1. **Decompose** right sides into singletons. Exact duplicates produced
//!    by the split are dropped, keeping the first occurrence.
//! 2. **Reduce left sides**: an attribute is extraneous if the remaining
//!    left side still determines the right attribute under the current
//!    working list. After every removal the scan of that left side starts
//!    over.
//! 3. **Drop redundant dependencies**: a dependency is redundant if its
//!    right attribute is in the closure of its left side under all the
//!    other dependencies. One forward pass, re-checking the same index
//!    after a removal, is enough, because removing a dependency never makes
//!    an earlier kept one redundant.
//!
//! Ties are broken by scan order (dependency order, then the canonical
//! attribute order within a left side), so the result is reproducible. A
//! different input order can yield a different, equally minimal cover.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::closure::closure;
use crate::error::{AnalysisError, Result};
use crate::types::{Attribute, FunctionalDependency};

/// One reduction performed while building a minimal cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoverEvent {
    /// Splitting right sides produced a dependency already in the list.
    DuplicateDropped { dependency: FunctionalDependency },
    /// `attribute` was extraneous in the left side of `dependency`.
    LeftAttributeRemoved {
        dependency: FunctionalDependency,
        attribute: Attribute,
    },
    /// `dependency` was implied by the remaining dependencies.
    RedundantDependencyRemoved { dependency: FunctionalDependency },
}

/// The dependency list after each pass, plus every reduction made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverTrace {
    /// After pass 1: singleton right sides.
    pub decomposed: Vec<FunctionalDependency>,
    /// After pass 2: no extraneous left attributes.
    pub left_reduced: Vec<FunctionalDependency>,
    /// After pass 3: the minimal cover.
    pub cover: Vec<FunctionalDependency>,
    pub events: Vec<CoverEvent>,
}

/// Computes a minimal cover of `dependencies`.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] for an empty dependency list.
///
/// # Examples
///
/// ```
/// use relnorm_core::{minimal_cover, parse_dependencies};
///
/// let fds = parse_dependencies("A -> B, C\nB -> C\nA -> B").unwrap();
/// let cover: Vec<String> = minimal_cover(&fds)
///     .unwrap()
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(cover, vec!["{A} → {B}", "{B} → {C}"]);
/// ```
pub fn minimal_cover(dependencies: &[FunctionalDependency]) -> Result<Vec<FunctionalDependency>> {
    Ok(minimal_cover_with_trace(dependencies)?.cover)
}

/// Computes a minimal cover and records the intermediate lists.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] for an empty dependency list.
pub fn minimal_cover_with_trace(dependencies: &[FunctionalDependency]) -> Result<CoverTrace> {
    if dependencies.is_empty() {
        return Err(AnalysisError::EmptyInput("functional dependencies"));
    }

    let mut events = Vec::new();

    let decomposed = decompose_right_sides(dependencies, &mut events);
    let left_reduced = reduce_left_sides(decomposed.clone(), &mut events)?;
    let cover = drop_redundant(left_reduced.clone(), &mut events)?;

    debug!(
        input = dependencies.len(),
        decomposed = decomposed.len(),
        cover = cover.len(),
        reductions = events.len(),
        "Built minimal cover"
    );

    Ok(CoverTrace {
        decomposed,
        left_reduced,
        cover,
        events,
    })
}

fn decompose_right_sides(
    dependencies: &[FunctionalDependency],
    events: &mut Vec<CoverEvent>,
) -> Vec<FunctionalDependency> {
    let mut seen = HashSet::new();
    let mut decomposed = Vec::new();

    for fd in dependencies.iter().flat_map(FunctionalDependency::singletons) {
        if seen.insert(fd.clone()) {
            decomposed.push(fd);
        } else {
            events.push(CoverEvent::DuplicateDropped { dependency: fd });
        }
    }

    decomposed
}

fn reduce_left_sides(
    mut working: Vec<FunctionalDependency>,
    events: &mut Vec<CoverEvent>,
) -> Result<Vec<FunctionalDependency>> {
    for i in 0..working.len() {
        let mut position = 0usize;

        loop {
            let current = working[i].clone();
            if current.left().len() <= 1 {
                break;
            }
            let Some(attribute) = current.left().iter().nth(position).cloned() else {
                break;
            };

            let trial = current.left().without(attribute.as_str());
            let reach = closure(&trial, &working)?;

            if current.right().is_subset(&reach) {
                debug!(dependency = %current, attribute = %attribute, "Removed extraneous left attribute");
                working[i] = FunctionalDependency::from_sides(trial, current.right().clone());
                events.push(CoverEvent::LeftAttributeRemoved {
                    dependency: current,
                    attribute,
                });
                position = 0;
            } else {
                position += 1;
            }
        }
    }

    Ok(working)
}

fn drop_redundant(
    mut working: Vec<FunctionalDependency>,
    events: &mut Vec<CoverEvent>,
) -> Result<Vec<FunctionalDependency>> {
    let mut index = 0usize;

    while index < working.len() {
        let candidate = working.remove(index);
        let reach = closure(candidate.left(), &working)?;

        if candidate.right().is_subset(&reach) {
            debug!(dependency = %candidate, "Removed redundant dependency");
            events.push(CoverEvent::RedundantDependencyRemoved {
                dependency: candidate,
            });
        } else {
            working.insert(index, candidate);
            index += 1;
        }
    }

    Ok(working)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_dependencies;

    fn rendered(fds: &[FunctionalDependency]) -> Vec<String> {
        fds.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_decompose_pass_splits_and_deduplicates() {
        let fds = parse_dependencies("A -> B, C\nB -> C\nA -> B").unwrap();
        let trace = minimal_cover_with_trace(&fds).unwrap();
        assert_eq!(
            rendered(&trace.decomposed),
            vec!["{A} → {B}", "{A} → {C}", "{B} → {C}"]
        );
        assert_eq!(rendered(&trace.cover), vec!["{A} → {B}", "{B} → {C}"]);
        assert!(trace.events.contains(&CoverEvent::RedundantDependencyRemoved {
            dependency: "A -> C".parse().unwrap(),
        }));
    }

    #[test]
    fn test_extraneous_left_attribute_is_removed() {
        let fds = parse_dependencies("A, B -> C\nA -> B").unwrap();
        let trace = minimal_cover_with_trace(&fds).unwrap();
        assert_eq!(rendered(&trace.left_reduced), vec!["{A} → {C}", "{A} → {B}"]);
        assert_eq!(
            trace.events[0],
            CoverEvent::LeftAttributeRemoved {
                dependency: "A, B -> C".parse().unwrap(),
                attribute: Attribute::new("B"),
            }
        );
    }

    #[test]
    fn test_left_scan_restarts_after_shrink() {
        // With A -> B and B -> D, both B and D are extraneous in A,B,D -> C.
        let fds = parse_dependencies("A, B, D -> C\nA -> B\nB -> D").unwrap();
        let cover = minimal_cover(&fds).unwrap();
        assert_eq!(
            rendered(&cover),
            vec!["{A} → {C}", "{A} → {B}", "{B} → {D}"]
        );
    }

    #[test]
    fn test_irreducible_left_side_is_kept() {
        let fds = parse_dependencies("A, B -> C").unwrap();
        let cover = minimal_cover(&fds).unwrap();
        assert_eq!(rendered(&cover), vec!["{A, B} → {C}"]);
    }

    #[test]
    fn test_cycle_keeps_one_direction_per_edge() {
        let fds = parse_dependencies("A -> B\nB -> A\nA -> C\nB -> C").unwrap();
        let cover = minimal_cover(&fds).unwrap();
        assert_eq!(rendered(&cover), vec!["{A} → {B}", "{B} → {A}", "{B} → {C}"]);
    }

    #[test]
    fn test_minimal_cover_rejects_empty_input() {
        assert_eq!(
            minimal_cover(&[]),
            Err(AnalysisError::EmptyInput("functional dependencies"))
        );
    }

    #[test]
    fn test_minimal_cover_has_singleton_right_sides() {
        let fds = parse_dependencies("A -> B, C, D\nB, C -> D, E").unwrap();
        let cover = minimal_cover(&fds).unwrap();
        assert!(cover.iter().all(|fd| fd.right().len() == 1));
    }
}
