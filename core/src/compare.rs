//! Equivalence and implication between dependency sets.
//!
//! Each set is first expanded into its *implied dependencies*: every
//! dependency `L → R` of the set, plus `L → a` for every attribute `a` in
//! `closure(L)` outside `L`. A dependency `X → Y` is implied when some
//! expansion entry `(L, R)` has `L ⊆ X` and `Y ⊆ R`. The expansion only
//! covers left sides that appear in the set, so when no entry matches the
//! check falls back to `Y ⊆ closure(X)`. That keeps the answer exact for
//! determinants that combine several left sides.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::closure::closure;
use crate::error::{AnalysisError, Result};
use crate::types::{AttributeSet, FunctionalDependency};

/// The expansion of a dependency set used for implication checks.
#[derive(Debug, Clone)]
pub struct ImpliedDependencies<'a> {
    source: &'a [FunctionalDependency],
    entries: Vec<FunctionalDependency>,
}

impl<'a> ImpliedDependencies<'a> {
    /// Expands `dependencies`.
    pub fn build(dependencies: &'a [FunctionalDependency]) -> Result<Self> {
        let mut entries = Vec::new();

        for fd in dependencies {
            entries.push(fd.clone());
            let reach = closure(fd.left(), dependencies)?;
            for attribute in reach.difference(fd.left()) {
                entries.push(FunctionalDependency::from_sides(
                    fd.left().clone(),
                    AttributeSet::single(attribute),
                ));
            }
        }

        Ok(Self {
            source: dependencies,
            entries,
        })
    }

    pub fn entries(&self) -> &[FunctionalDependency] {
        &self.entries
    }

    /// Returns `true` if `dependency` follows from the expanded set.
    pub fn implies(&self, dependency: &FunctionalDependency) -> Result<bool> {
        let listed = self.entries.iter().any(|entry| {
            entry.left().is_subset(dependency.left()) && dependency.right().is_subset(entry.right())
        });
        if listed {
            return Ok(true);
        }
        Ok(dependency
            .right()
            .is_subset(&closure(dependency.left(), self.source)?))
    }

    /// Dependencies of `other` that do not follow from this set, in order.
    pub fn missing_from(&self, other: &[FunctionalDependency]) -> Result<Vec<FunctionalDependency>> {
        let mut missing = Vec::new();
        for fd in other {
            if !self.implies(fd)? {
                missing.push(fd.clone());
            }
        }
        Ok(missing)
    }
}

/// Dependencies of each set that the other set does not imply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDependencies {
    /// In the first set, not implied by the second.
    pub from_first_to_second: Vec<FunctionalDependency>,
    /// In the second set, not implied by the first.
    pub from_second_to_first: Vec<FunctionalDependency>,
}

impl MissingDependencies {
    pub fn is_empty(&self) -> bool {
        self.from_first_to_second.is_empty() && self.from_second_to_first.is_empty()
    }
}

/// Full comparison of two dependency sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub equivalent: bool,
    pub missing: MissingDependencies,
}

/// Returns `true` if `first` and `second` imply each other.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] if the universe is empty. An empty
/// dependency set is valid and implies only trivial dependencies.
///
/// # Examples
///
/// ```
/// use relnorm_core::{equivalent, parse_attributes, parse_dependencies};
///
/// let universe = parse_attributes("A, B, C").unwrap();
/// let first = parse_dependencies("A -> B\nB -> C").unwrap();
/// let second = parse_dependencies("A -> B, C\nB -> C").unwrap();
/// assert!(equivalent(&first, &second, &universe).unwrap());
/// ```
pub fn equivalent(
    first: &[FunctionalDependency],
    second: &[FunctionalDependency],
    universe: &AttributeSet,
) -> Result<bool> {
    Ok(compare(first, second, universe)?.equivalent)
}

/// Lists, per direction, the dependencies one set does not imply of the
/// other.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] if the universe is empty. An empty
/// dependency set is valid and implies only trivial dependencies.
pub fn missing_dependencies(
    first: &[FunctionalDependency],
    second: &[FunctionalDependency],
    universe: &AttributeSet,
) -> Result<MissingDependencies> {
    Ok(compare(first, second, universe)?.missing)
}

/// Compares two dependency sets over the same universe.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] if the universe is empty. An empty
/// dependency set is valid and implies only trivial dependencies.
///
/// # Examples
///
/// ```
/// use relnorm_core::{compare, parse_attributes, parse_dependencies};
///
/// let universe = parse_attributes("A, B, C").unwrap();
/// let first = parse_dependencies("A -> B").unwrap();
/// let second = parse_dependencies("A -> B\nA -> C").unwrap();
///
/// let result = compare(&first, &second, &universe).unwrap();
/// assert!(!result.equivalent);
/// assert_eq!(result.missing.from_second_to_first[0].to_string(), "{A} → {C}");
/// ```
pub fn compare(
    first: &[FunctionalDependency],
    second: &[FunctionalDependency],
    universe: &AttributeSet,
) -> Result<Comparison> {
    if universe.is_empty() {
        return Err(AnalysisError::EmptyInput("attributes"));
    }

    let first_implied = ImpliedDependencies::build(first)?;
    let second_implied = ImpliedDependencies::build(second)?;

    let missing = MissingDependencies {
        from_first_to_second: second_implied.missing_from(first)?,
        from_second_to_first: first_implied.missing_from(second)?,
    };
    let equivalent = missing.is_empty();

    debug!(
        universe = universe.len(),
        first = first.len(),
        second = second.len(),
        equivalent,
        "Compared dependency sets"
    );

    Ok(Comparison {
        equivalent,
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_attributes, parse_dependencies};

    #[test]
    fn test_expansion_adds_closure_singletons() {
        let fds = parse_dependencies("A -> B\nB -> C").unwrap();
        let implied = ImpliedDependencies::build(&fds).unwrap();
        let rendered: Vec<String> = implied.entries().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["{A} → {B}", "{A} → {B}", "{A} → {C}", "{B} → {C}", "{B} → {C}"]
        );
    }

    #[test]
    fn test_missing_dependency_reported_in_one_direction() {
        let universe = parse_attributes("A, B, C").unwrap();
        let first = parse_dependencies("A -> B").unwrap();
        let second = parse_dependencies("A -> B\nA -> C").unwrap();

        let missing = missing_dependencies(&first, &second, &universe).unwrap();
        assert!(missing.from_first_to_second.is_empty());
        assert_eq!(
            missing.from_second_to_first,
            vec!["A -> C".parse::<FunctionalDependency>().unwrap()]
        );
        assert!(!equivalent(&first, &second, &universe).unwrap());
    }

    #[test]
    fn test_implication_with_augmented_left_side() {
        let fds = parse_dependencies("A -> B").unwrap();
        let implied = ImpliedDependencies::build(&fds).unwrap();
        assert!(implied.implies(&"A, C -> B".parse().unwrap()).unwrap());
        assert!(!implied.implies(&"C -> B".parse().unwrap()).unwrap());
    }

    #[test]
    fn test_implication_combining_two_left_sides() {
        let fds = parse_dependencies("A -> B\nC -> D").unwrap();
        let implied = ImpliedDependencies::build(&fds).unwrap();
        assert!(implied.implies(&"A, C -> B, D".parse().unwrap()).unwrap());
    }

    #[test]
    fn test_equivalent_sets_with_different_shapes() {
        let universe = parse_attributes("A, B, C").unwrap();
        let first = parse_dependencies("A -> B\nB -> A\nA -> C").unwrap();
        let second = parse_dependencies("A -> B, C\nB -> A").unwrap();
        let result = compare(&first, &second, &universe).unwrap();
        assert!(result.equivalent);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_trivial_set_is_equivalent_to_empty_set() {
        let universe = parse_attributes("A").unwrap();
        let fds = parse_dependencies("A -> A").unwrap();
        assert!(equivalent(&fds, &[], &universe).unwrap());
        assert!(equivalent(&[], &fds, &universe).unwrap());
    }

    #[test]
    fn test_empty_set_misses_every_non_trivial_dependency() {
        let universe = parse_attributes("A, B").unwrap();
        let fds = parse_dependencies("A -> B\nA, B -> A").unwrap();
        let result = compare(&[], &fds, &universe).unwrap();
        assert!(!result.equivalent);
        assert!(result.missing.from_first_to_second.is_empty());
        assert_eq!(
            result.missing.from_second_to_first,
            vec!["A -> B".parse::<FunctionalDependency>().unwrap()]
        );
    }

    #[test]
    fn test_compare_rejects_empty_universe() {
        let fds = parse_dependencies("A -> B").unwrap();
        assert_eq!(
            compare(&fds, &fds, &AttributeSet::new()),
            Err(AnalysisError::EmptyInput("attributes"))
        );
    }
}
