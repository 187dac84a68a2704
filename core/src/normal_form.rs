//! Normal form classification (2NF, 3NF, BCNF).
//!
//! Every relation here is assumed to be in 1NF already; atomicity is a
//! parsing concern. Trivial dependencies (right ⊆ left) never violate any
//! form, and only the non-trivial part of a right side (`right \ left`) is
//! inspected for prime attributes.
//!
//! The three tests are nested: a BCNF violation is a non-superkey
//! determinant, a 3NF violation is one that also determines a non-prime
//! attribute, and a 2NF violation is a 3NF violation whose determinant is a
//! proper subset of a candidate key. A proper subset of a candidate key is
//! never a superkey, so BCNF ⇒ 3NF ⇒ 2NF holds by construction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::closure::is_superkey;
use crate::error::{AnalysisError, Result};
use crate::keys::{AttributePartition, candidate_keys, prime_partition};
use crate::types::{AttributeSet, FunctionalDependency, NormalForm};

/// A dependency that breaks one of the normal form tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The normal form whose test this dependency fails.
    pub form: NormalForm,
    pub dependency: FunctionalDependency,
}

/// Result of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Strictest normal form the relation satisfies.
    pub normal_form: NormalForm,
    pub candidate_keys: Vec<AttributeSet>,
    pub partition: AttributePartition,
    /// Every failing (form, dependency) pair, strictest form first.
    pub violations: Vec<Violation>,
}

impl Classification {
    /// Returns `true` if the relation passes the test for `form`.
    pub fn satisfies(&self, form: NormalForm) -> bool {
        self.normal_form >= form
    }
}

/// Classifies a relation into the strictest normal form it satisfies.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] if there are no attributes or no
/// dependencies, and [`AnalysisError::NoCandidateKey`] if the key search
/// fails.
///
/// # Examples
///
/// ```
/// use relnorm_core::{NormalForm, classify, parse_attributes, parse_dependencies};
///
/// let universe = parse_attributes("A, B, C").unwrap();
/// let fds = parse_dependencies("A, B -> C\nC -> B").unwrap();
///
/// let result = classify(&universe, &fds).unwrap();
/// assert_eq!(result.normal_form, NormalForm::Third);
/// assert_eq!(result.candidate_keys.len(), 2);
/// ```
pub fn classify(
    universe: &AttributeSet,
    dependencies: &[FunctionalDependency],
) -> Result<Classification> {
    if universe.is_empty() {
        return Err(AnalysisError::EmptyInput("attributes"));
    }
    if dependencies.is_empty() {
        return Err(AnalysisError::EmptyInput("functional dependencies"));
    }

    let keys = candidate_keys(universe, dependencies)?;
    let partition = prime_partition(universe, &keys);

    let mut bcnf = Vec::new();
    let mut third = Vec::new();
    let mut second = Vec::new();

    for fd in dependencies {
        if fd.is_trivial() || is_superkey(fd.left(), universe, dependencies)? {
            continue;
        }
        bcnf.push(fd.clone());

        let determined = fd.right().difference(fd.left());
        if determined.is_subset(&partition.prime) {
            continue;
        }
        third.push(fd.clone());

        if keys.iter().any(|key| fd.left().is_proper_subset(key)) {
            second.push(fd.clone());
        }
    }

    let normal_form = if bcnf.is_empty() {
        NormalForm::BoyceCodd
    } else if third.is_empty() {
        NormalForm::Third
    } else if second.is_empty() {
        NormalForm::Second
    } else {
        NormalForm::First
    };

    debug!(
        normal_form = %normal_form,
        keys = keys.len(),
        bcnf_violations = bcnf.len(),
        third_violations = third.len(),
        second_violations = second.len(),
        "Classified relation"
    );

    let violations = [
        (NormalForm::BoyceCodd, bcnf),
        (NormalForm::Third, third),
        (NormalForm::Second, second),
    ]
    .into_iter()
    .flat_map(|(form, fds)| {
        fds.into_iter()
            .map(move |dependency| Violation { form, dependency })
    })
    .collect();

    Ok(Classification {
        normal_form,
        candidate_keys: keys,
        partition,
        violations,
    })
}

/// Returns `true` if every non-trivial determinant is a superkey.
pub fn is_bcnf(universe: &AttributeSet, dependencies: &[FunctionalDependency]) -> Result<bool> {
    for fd in dependencies {
        if !fd.is_trivial() && !is_superkey(fd.left(), universe, dependencies)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Returns `true` if the relation is in 3NF.
pub fn is_third_normal_form(
    universe: &AttributeSet,
    dependencies: &[FunctionalDependency],
) -> Result<bool> {
    Ok(classify(universe, dependencies)?.satisfies(NormalForm::Third))
}

/// Returns `true` if the relation is in 2NF.
pub fn is_second_normal_form(
    universe: &AttributeSet,
    dependencies: &[FunctionalDependency],
) -> Result<bool> {
    Ok(classify(universe, dependencies)?.satisfies(NormalForm::Second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_attributes, parse_dependencies};

    fn classify_text(attributes: &str, dependencies: &str) -> Classification {
        let universe = parse_attributes(attributes).unwrap();
        let fds = parse_dependencies(dependencies).unwrap();
        classify(&universe, &fds).unwrap()
    }

    #[test]
    fn test_mutual_dependency_is_bcnf() {
        let result = classify_text("A, B", "A -> B\nB -> A");
        assert_eq!(result.normal_form, NormalForm::BoyceCodd);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_prime_right_side_is_third_normal_form() {
        let result = classify_text("A, B, C", "A, B -> C\nC -> B");
        assert_eq!(result.normal_form, NormalForm::Third);
        assert_eq!(
            result.violations,
            vec![Violation {
                form: NormalForm::BoyceCodd,
                dependency: "C -> B".parse().unwrap(),
            }]
        );
        assert!(result.satisfies(NormalForm::Second));
        assert!(!result.satisfies(NormalForm::BoyceCodd));
    }

    #[test]
    fn test_transitive_dependency_is_second_normal_form() {
        let result = classify_text("A, B, C", "A -> B\nB -> C");
        assert_eq!(result.normal_form, NormalForm::Second);
        assert_eq!(result.partition.non_prime.to_string(), "{B, C}");
    }

    #[test]
    fn test_partial_dependency_is_first_normal_form() {
        let result = classify_text("A, B, C, D", "A, B -> C\nA -> D");
        assert_eq!(result.normal_form, NormalForm::First);
        assert!(result.violations.contains(&Violation {
            form: NormalForm::Second,
            dependency: "A -> D".parse().unwrap(),
        }));
    }

    #[test]
    fn test_trivial_dependency_never_violates() {
        let result = classify_text("A, B, C", "A -> B, C\nB, C -> B");
        assert_eq!(result.normal_form, NormalForm::BoyceCodd);
    }

    #[test]
    fn test_classify_requires_dependencies() {
        let universe = parse_attributes("A").unwrap();
        assert_eq!(
            classify(&universe, &[]),
            Err(AnalysisError::EmptyInput("functional dependencies"))
        );
    }

    #[test]
    fn test_helper_predicates_agree_with_classification() {
        let universe = parse_attributes("A, B, C").unwrap();
        let fds = parse_dependencies("A -> B\nB -> C").unwrap();
        assert!(!is_bcnf(&universe, &fds).unwrap());
        assert!(!is_third_normal_form(&universe, &fds).unwrap());
        assert!(is_second_normal_form(&universe, &fds).unwrap());
    }
}
