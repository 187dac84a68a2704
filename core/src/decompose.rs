//! BCNF decomposition.
//!
//! Sub-relations wait in an explicit work queue instead of on the call
//! stack. Each popped relation is checked against its *own* dependency list
//! and attributes. If some non-trivial dependency `L → R` has a left side
//! that does not determine every local attribute, the relation is split
//! into
//!
//! - `R1 = closure(L)`, the attributes `L` determines, and
//! - `R2 = (local \ R1) ∪ L`, the rest plus the determinant,
//!
//! and each half gets the dependencies that lie entirely inside it.
//!
//! Both halves are strictly smaller than their parent: `R1` misses some
//! local attribute because `L` is not a local superkey, and `R2` misses
//! `R \ L`. Queue depth is therefore bounded by the universe size, which
//! is also the defensive cap.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::closure::closure;
use crate::error::{AnalysisError, Result};
use crate::types::{AttributeSet, FunctionalDependency, Relation};

/// Decomposes a relation into BCNF sub-relations.
///
/// Sub-relations are returned in the order they become terminal.
/// Sub-relations without dependencies are dropped, unless they hold an
/// attribute that no relation with dependencies covers. Those are kept so
/// the union of the result is always the full universe, which means a
/// returned [`Relation`] may have an empty dependency list.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] if there are no attributes or no
/// dependencies, [`AnalysisError::UnknownAttribute`] if a dependency uses an
/// attribute outside `universe`, and
/// [`AnalysisError::IterationBoundExceeded`] if a split fails to make
/// progress.
///
/// # Examples
///
/// ```
/// use relnorm_core::{decompose_bcnf, parse_attributes, parse_dependencies};
///
/// let universe = parse_attributes("A, B, C").unwrap();
/// let fds = parse_dependencies("A -> B\nB -> C").unwrap();
///
/// let relations = decompose_bcnf(&universe, &fds).unwrap();
/// let rendered: Vec<String> = relations.iter().map(|r| r.attributes.to_string()).collect();
/// assert_eq!(rendered, vec!["{B, C}", "{A, B}"]);
/// ```
pub fn decompose_bcnf(
    universe: &AttributeSet,
    dependencies: &[FunctionalDependency],
) -> Result<Vec<Relation>> {
    if universe.is_empty() {
        return Err(AnalysisError::EmptyInput("attributes"));
    }
    if dependencies.is_empty() {
        return Err(AnalysisError::EmptyInput("functional dependencies"));
    }
    for fd in dependencies {
        let outside = fd.attributes().difference(universe);
        if let Some(attribute) = outside.iter().next() {
            return Err(AnalysisError::UnknownAttribute {
                attribute: attribute.to_string(),
                dependency: fd.to_string(),
            });
        }
    }

    let depth_limit = universe.len();
    let mut queue = VecDeque::from([(
        Relation {
            attributes: universe.clone(),
            dependencies: dependencies.to_vec(),
        },
        0usize,
    )]);
    let mut terminal = Vec::new();

    while let Some((relation, depth)) = queue.pop_front() {
        let Some(violation) = first_violation(&relation)? else {
            trace!(attributes = %relation.attributes, "Relation is in BCNF");
            terminal.push(relation);
            continue;
        };

        if depth >= depth_limit {
            return Err(AnalysisError::IterationBoundExceeded {
                operation: "BCNF decomposition",
                limit: depth_limit,
            });
        }

        let determined = closure(violation.left(), &relation.dependencies)?
            .intersection(&relation.attributes);
        let remainder = relation
            .attributes
            .difference(&determined)
            .union(violation.left());

        debug!(
            relation = %relation.attributes,
            violation = %violation,
            left = %determined,
            right = %remainder,
            depth,
            "Split relation"
        );

        for attributes in [determined, remainder] {
            let dependencies = project(&relation.dependencies, &attributes);
            queue.push_back((
                Relation {
                    attributes,
                    dependencies,
                },
                depth + 1,
            ));
        }
    }

    Ok(drop_uninformative(terminal))
}

/// Keeps the dependencies whose attributes all lie within `attributes`.
pub fn project(
    dependencies: &[FunctionalDependency],
    attributes: &AttributeSet,
) -> Vec<FunctionalDependency> {
    dependencies
        .iter()
        .filter(|fd| fd.is_within(attributes))
        .cloned()
        .collect()
}

/// Returns `true` if every non-trivial local dependency has a left side that
/// determines all of the relation's attributes.
pub fn is_locally_bcnf(relation: &Relation) -> Result<bool> {
    Ok(first_violation(relation)?.is_none())
}

fn first_violation(relation: &Relation) -> Result<Option<FunctionalDependency>> {
    for fd in &relation.dependencies {
        if fd.is_trivial() || !fd.is_within(&relation.attributes) {
            continue;
        }
        let reach = closure(fd.left(), &relation.dependencies)?;
        if !reach.is_superset(&relation.attributes) {
            return Ok(Some(fd.clone()));
        }
    }
    Ok(None)
}

fn drop_uninformative(terminal: Vec<Relation>) -> Vec<Relation> {
    let covered = terminal
        .iter()
        .filter(|relation| !relation.dependencies.is_empty())
        .fold(AttributeSet::new(), |acc, relation| {
            acc.union(&relation.attributes)
        });

    terminal
        .into_iter()
        .filter(|relation| {
            !relation.dependencies.is_empty() || !relation.attributes.is_subset(&covered)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_attributes, parse_dependencies};

    fn decompose_text(attributes: &str, dependencies: &str) -> Vec<Relation> {
        let universe = parse_attributes(attributes).unwrap();
        let fds = parse_dependencies(dependencies).unwrap();
        decompose_bcnf(&universe, &fds).unwrap()
    }

    fn summary(relations: &[Relation]) -> Vec<String> {
        relations
            .iter()
            .map(|r| {
                let fds: Vec<String> = r.dependencies.iter().map(ToString::to_string).collect();
                format!("{}: {}", r.attributes, fds.join("; "))
            })
            .collect()
    }

    #[test]
    fn test_bcnf_relation_is_returned_unchanged() {
        let relations = decompose_text("A, B", "A -> B\nB -> A");
        assert_eq!(summary(&relations), vec!["{A, B}: {A} → {B}; {B} → {A}"]);
    }

    #[test]
    fn test_transitive_chain_splits_on_first_violation() {
        let relations = decompose_text("A, B, C", "A -> B\nB -> C");
        assert_eq!(
            summary(&relations),
            vec!["{B, C}: {B} → {C}", "{A, B}: {A} → {B}"]
        );
    }

    #[test]
    fn test_dependency_free_half_kept_when_it_carries_attributes() {
        let relations = decompose_text("A, B, C", "A, B -> C\nC -> B");
        assert_eq!(summary(&relations), vec!["{B, C}: {C} → {B}", "{A, C}: "]);
    }

    #[test]
    fn test_every_output_relation_is_locally_bcnf_and_covers_universe() {
        let universe = parse_attributes("A, B, C, D, E").unwrap();
        let fds = parse_dependencies("A -> B\nB -> C\nC, D -> E\nE -> A").unwrap();
        let relations = decompose_bcnf(&universe, &fds).unwrap();

        let covered = relations
            .iter()
            .fold(AttributeSet::new(), |acc, r| acc.union(&r.attributes));
        assert_eq!(covered, universe);
        for relation in &relations {
            assert!(is_locally_bcnf(relation).unwrap(), "{}", relation.attributes);
            assert!(relation.attributes.is_subset(&universe));
        }
    }

    #[test]
    fn test_projection_keeps_only_contained_dependencies() {
        let fds = parse_dependencies("A -> B\nB -> C\nA, C -> D").unwrap();
        let scope = parse_attributes("A, B, C").unwrap();
        let projected: Vec<String> = project(&fds, &scope).iter().map(ToString::to_string).collect();
        assert_eq!(projected, vec!["{A} → {B}", "{B} → {C}"]);
    }

    #[test]
    fn test_dependency_outside_universe_is_rejected() {
        let universe = parse_attributes("A, B, C").unwrap();
        let fds = parse_dependencies("A -> B\nB -> C, Z").unwrap();
        assert_eq!(
            decompose_bcnf(&universe, &fds),
            Err(AnalysisError::UnknownAttribute {
                attribute: "Z".to_string(),
                dependency: "{B} → {C, Z}".to_string(),
            })
        );
    }

    #[test]
    fn test_decompose_rejects_empty_input() {
        let universe = parse_attributes("A").unwrap();
        assert_eq!(
            decompose_bcnf(&universe, &[]),
            Err(AnalysisError::EmptyInput("functional dependencies"))
        );
    }
}
