//! Candidate-key and superkey search.
//!
//! Both searches walk the power set of the attribute universe breadth-first,
//! smallest subsets first. Subsets are generated canonically: a subset is
//! only extended with attributes that sort after its current last
//! attribute. Each subset is therefore produced exactly once, and the
//! frontier is the only state the search keeps.
//!
//! # Scaling
//!
//! The worst case tests every one of the 2^n subsets of an n-attribute
//! universe. This is inherent to minimal-key finding. Callers analysing
//! wide relations should cap the universe size before calling in.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::closure::is_superkey;
use crate::error::{AnalysisError, Result};
use crate::types::{Attribute, AttributeSet, FunctionalDependency};

/// Finds all candidate keys (minimal superkeys) of a relation.
///
/// Breadth-first order makes minimality a consequence of traversal: when a
/// subset of size k is tested, every smaller subset has already been tested
/// or ruled out. Any subset that contains an already-found key is skipped
/// without a closure test.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] for an empty universe and
/// [`AnalysisError::NoCandidateKey`] when no subset determines exactly the
/// universe (dependencies reaching outside the declared attributes).
///
/// # Examples
///
/// ```
/// use relnorm_core::{candidate_keys, parse_attributes, parse_dependencies};
///
/// let universe = parse_attributes("A, B, C").unwrap();
/// let fds = parse_dependencies("A, B -> C\nC -> B").unwrap();
///
/// let keys: Vec<String> = candidate_keys(&universe, &fds)
///     .unwrap()
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(keys, vec!["{A, B}", "{A, C}"]);
/// ```
pub fn candidate_keys(
    universe: &AttributeSet,
    dependencies: &[FunctionalDependency],
) -> Result<Vec<AttributeSet>> {
    if universe.is_empty() {
        return Err(AnalysisError::EmptyInput("attributes"));
    }

    let mut keys: Vec<AttributeSet> = Vec::new();
    let mut frontier = VecDeque::from([AttributeSet::new()]);
    let mut tested = 0usize;

    while let Some(candidate) = frontier.pop_front() {
        if keys.iter().any(|key| candidate.is_superset(key)) {
            continue;
        }

        tested += 1;
        if is_superkey(&candidate, universe, dependencies)? {
            keys.push(candidate);
            continue;
        }

        frontier.extend(extensions(&candidate, universe));
    }

    debug!(
        universe = universe.len(),
        tested,
        keys = keys.len(),
        "Candidate key search finished"
    );

    if keys.is_empty() {
        return Err(AnalysisError::NoCandidateKey);
    }
    Ok(keys)
}

/// Finds every non-minimal superkey.
///
/// Walks the same breadth-first traversal as [`candidate_keys`] but does not
/// stop at superkeys, so every superset of a key is visited. Subsets equal
/// to one of `candidate_keys` are excluded; everything else whose closure
/// is the universe is returned, smallest first.
///
/// # Examples
///
/// ```
/// use relnorm_core::{candidate_keys, parse_attributes, parse_dependencies, superkeys};
///
/// let universe = parse_attributes("A, B").unwrap();
/// let fds = parse_dependencies("A -> B").unwrap();
/// let keys = candidate_keys(&universe, &fds).unwrap();
///
/// let supers = superkeys(&universe, &fds, &keys).unwrap();
/// assert_eq!(supers.len(), 1);
/// assert_eq!(supers[0].to_string(), "{A, B}");
/// ```
pub fn superkeys(
    universe: &AttributeSet,
    dependencies: &[FunctionalDependency],
    candidate_keys: &[AttributeSet],
) -> Result<Vec<AttributeSet>> {
    if universe.is_empty() {
        return Err(AnalysisError::EmptyInput("attributes"));
    }

    let mut found = Vec::new();
    let mut frontier = VecDeque::from([AttributeSet::new()]);

    while let Some(candidate) = frontier.pop_front() {
        frontier.extend(extensions(&candidate, universe));

        if candidate_keys.contains(&candidate) {
            continue;
        }
        // Supersets of a key are superkeys by monotonicity of closure.
        let qualifies = candidate_keys.iter().any(|key| candidate.is_superset(key))
            || is_superkey(&candidate, universe, dependencies)?;
        if qualifies {
            found.push(candidate);
        }
    }

    debug!(
        universe = universe.len(),
        superkeys = found.len(),
        "Superkey search finished"
    );
    Ok(found)
}

/// Prime attributes (members of some candidate key) and the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributePartition {
    pub prime: AttributeSet,
    pub non_prime: AttributeSet,
}

/// Splits the universe into prime and non-prime attributes.
///
/// # Examples
///
/// ```
/// use relnorm_core::{parse_attributes, prime_partition};
///
/// let universe = parse_attributes("A, B, C").unwrap();
/// let keys = vec![parse_attributes("A, B").unwrap()];
/// let partition = prime_partition(&universe, &keys);
/// assert_eq!(partition.prime.to_string(), "{A, B}");
/// assert_eq!(partition.non_prime.to_string(), "{C}");
/// ```
pub fn prime_partition(
    universe: &AttributeSet,
    candidate_keys: &[AttributeSet],
) -> AttributePartition {
    let prime = candidate_keys
        .iter()
        .fold(AttributeSet::new(), |acc, key| acc.union(key));
    let non_prime = universe.difference(&prime);
    AttributePartition { prime, non_prime }
}

/// One-attribute extensions of `subset` in canonical order.
fn extensions<'a>(
    subset: &'a AttributeSet,
    universe: &'a AttributeSet,
) -> impl Iterator<Item = AttributeSet> + 'a {
    let last: Option<&Attribute> = subset.iter().next_back();
    universe
        .iter()
        .filter(move |attribute| last.is_none_or(|last| *attribute > last))
        .map(move |attribute| subset.with(attribute))
}
