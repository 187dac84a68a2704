//! Relational schema type definitions.
//!
//! This module defines the value types every analysis works over:
//! attributes, attribute sets, functional dependencies, schemas, and the
//! sub-relations produced by decomposition. All of them are immutable once
//! built. Analyses always return new values instead of editing their inputs.
//!
//! The types serialize with [`serde`] so reports can be written as JSON or
//! YAML without extra conversion layers.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// An opaque, case-sensitive attribute label.
///
/// # Examples
///
/// ```
/// use relnorm_core::Attribute;
///
/// let a = Attribute::new("StudentId");
/// assert_eq!(a.as_str(), "StudentId");
/// assert_ne!(a, Attribute::new("studentid"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attribute(String);

impl Attribute {
    /// Creates an attribute from any string-like label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the attribute label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Attribute {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Attribute {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Attribute {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// A set of attributes in canonical (lexical) order.
///
/// Equality and hashing ignore insertion order, so two sets built from
/// `A, B` and `B, A` compare equal and deduplicate against each other.
///
/// # Examples
///
/// ```
/// use relnorm_core::AttributeSet;
///
/// let ab: AttributeSet = ["B", "A"].into_iter().collect();
/// let abc: AttributeSet = ["A", "B", "C"].into_iter().collect();
///
/// assert!(ab.is_proper_subset(&abc));
/// assert_eq!(ab.to_string(), "{A, B}");
/// assert_eq!(abc.difference(&ab).to_string(), "{C}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet(BTreeSet<Attribute>);

impl AttributeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set holding exactly one attribute.
    pub fn single(attribute: Attribute) -> Self {
        Self(BTreeSet::from([attribute]))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the set contains an attribute with this label.
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    /// Inserts an attribute, returning `true` if it was not present.
    pub fn insert(&mut self, attribute: Attribute) -> bool {
        self.0.insert(attribute)
    }

    /// Removes an attribute, returning `true` if it was present.
    pub fn remove(&mut self, label: &str) -> bool {
        self.0.remove(label)
    }

    /// Iterates attributes in canonical order.
    pub fn iter(&self) -> std::collections::btree_set::Iter<'_, Attribute> {
        self.0.iter()
    }

    pub fn is_subset(&self, other: &AttributeSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn is_superset(&self, other: &AttributeSet) -> bool {
        self.0.is_superset(&other.0)
    }

    /// Returns `true` if `self ⊊ other`.
    pub fn is_proper_subset(&self, other: &AttributeSet) -> bool {
        self.len() < other.len() && self.is_subset(other)
    }

    pub fn union(&self, other: &AttributeSet) -> AttributeSet {
        Self(self.0.union(&other.0).cloned().collect())
    }

    pub fn difference(&self, other: &AttributeSet) -> AttributeSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    pub fn intersection(&self, other: &AttributeSet) -> AttributeSet {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    /// Returns a copy of this set with one more attribute.
    pub fn with(&self, attribute: &Attribute) -> AttributeSet {
        let mut extended = self.clone();
        extended.insert(attribute.clone());
        extended
    }

    /// Returns a copy of this set without the given attribute.
    pub fn without(&self, label: &str) -> AttributeSet {
        let mut reduced = self.clone();
        reduced.remove(label);
        reduced
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, attribute) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{attribute}")?;
        }
        f.write_str("}")
    }
}

impl<A: Into<Attribute>> FromIterator<A> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Extend<Attribute> for AttributeSet {
    fn extend<I: IntoIterator<Item = Attribute>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for AttributeSet {
    type Item = Attribute;
    type IntoIter = std::collections::btree_set::IntoIter<Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::collections::btree_set::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A functional dependency `left → right`.
///
/// Both sides are non-empty; [`FunctionalDependency::new`] and
/// deserialization reject an empty side. A dependency whose right side is
/// contained in its left side is *trivial*; it is accepted but never
/// produced by the reduction passes.
///
/// # Examples
///
/// ```
/// use relnorm_core::FunctionalDependency;
///
/// let fd: FunctionalDependency = "A, B -> C".parse().unwrap();
/// assert_eq!(fd.left().len(), 2);
/// assert!(!fd.is_trivial());
/// assert_eq!(fd.to_string(), "{A, B} → {C}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDependency")]
pub struct FunctionalDependency {
    left: AttributeSet,
    right: AttributeSet,
}

#[derive(Deserialize)]
struct RawDependency {
    left: AttributeSet,
    right: AttributeSet,
}

impl TryFrom<RawDependency> for FunctionalDependency {
    type Error = AnalysisError;

    fn try_from(raw: RawDependency) -> Result<Self> {
        Self::new(raw.left, raw.right)
    }
}

impl FunctionalDependency {
    /// Creates a dependency.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyInput`] if either side is empty.
    pub fn new(left: AttributeSet, right: AttributeSet) -> Result<Self> {
        if left.is_empty() {
            return Err(AnalysisError::EmptyInput("left-hand attributes"));
        }
        if right.is_empty() {
            return Err(AnalysisError::EmptyInput("right-hand attributes"));
        }
        Ok(Self { left, right })
    }

    /// Builds a dependency from sides already known to be non-empty.
    pub(crate) fn from_sides(left: AttributeSet, right: AttributeSet) -> Self {
        debug_assert!(!left.is_empty() && !right.is_empty());
        Self { left, right }
    }

    pub fn left(&self) -> &AttributeSet {
        &self.left
    }

    pub fn right(&self) -> &AttributeSet {
        &self.right
    }

    /// Returns `true` when `right ⊆ left`.
    pub fn is_trivial(&self) -> bool {
        self.right.is_subset(&self.left)
    }

    /// All attributes mentioned on either side.
    pub fn attributes(&self) -> AttributeSet {
        self.left.union(&self.right)
    }

    /// Returns `true` if every attribute on both sides lies within `scope`.
    pub fn is_within(&self, scope: &AttributeSet) -> bool {
        self.left.is_subset(scope) && self.right.is_subset(scope)
    }

    /// Splits the right side into one dependency per attribute (the
    /// decomposition rule).
    pub fn singletons(&self) -> impl Iterator<Item = FunctionalDependency> + '_ {
        self.right.iter().map(|attribute| {
            Self::from_sides(self.left.clone(), AttributeSet::single(attribute.clone()))
        })
    }
}

impl fmt::Display for FunctionalDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.left, self.right)
    }
}

impl std::str::FromStr for FunctionalDependency {
    type Err = AnalysisError;

    fn from_str(line: &str) -> Result<Self> {
        Ok(crate::parse::parse_dependency_line(line, 1)?)
    }
}

/// A relation schema: an attribute universe plus its dependencies.
///
/// The universe and the dependency list are both required to be non-empty.
/// Dependencies are expected to mention only attributes of the universe;
/// [`validate_schema`](crate::validate_schema) reports the ones that don't.
///
/// # Examples
///
/// ```
/// use relnorm_core::Schema;
///
/// let schema = Schema::parse("A, B, C", "A -> B\nB -> C").unwrap();
/// assert_eq!(schema.attributes().len(), 3);
/// assert_eq!(schema.dependencies().len(), 2);
///
/// assert!(Schema::parse("A, B", "").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema")]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    attributes: AttributeSet,
    dependencies: Vec<FunctionalDependency>,
}

#[derive(Deserialize)]
struct RawSchema {
    #[serde(default)]
    name: Option<String>,
    attributes: AttributeSet,
    dependencies: Vec<FunctionalDependency>,
}

impl TryFrom<RawSchema> for Schema {
    type Error = AnalysisError;

    fn try_from(raw: RawSchema) -> Result<Self> {
        let schema = Self::new(raw.attributes, raw.dependencies)?;
        Ok(match raw.name {
            Some(name) => schema.with_name(name),
            None => schema,
        })
    }
}

impl Schema {
    /// Creates an unnamed schema.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyInput`] if there are no attributes or
    /// no dependencies.
    pub fn new(
        attributes: AttributeSet,
        dependencies: Vec<FunctionalDependency>,
    ) -> Result<Self> {
        if attributes.is_empty() {
            return Err(AnalysisError::EmptyInput("attributes"));
        }
        if dependencies.is_empty() {
            return Err(AnalysisError::EmptyInput("functional dependencies"));
        }
        Ok(Self {
            name: None,
            attributes,
            dependencies,
        })
    }

    /// Parses a comma-separated attribute line and a dependency list.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Parse`] for malformed dependency lines and
    /// [`AnalysisError::EmptyInput`] if either input is empty.
    pub fn parse(attributes: &str, dependencies: &str) -> Result<Self> {
        let attributes = crate::parse::parse_attributes(attributes)?;
        let dependencies = crate::parse::parse_dependencies(dependencies)?;
        Self::new(attributes, dependencies)
    }

    /// Attaches a relation name used in reports.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.trim().is_empty() {
            None
        } else {
            Some(name.trim().to_string())
        };
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn dependencies(&self) -> &[FunctionalDependency] {
        &self.dependencies
    }
}

/// One sub-relation of a decomposition, with its projected dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub attributes: AttributeSet,
    pub dependencies: Vec<FunctionalDependency>,
}

/// Normal forms, ordered from weakest to strictest.
///
/// # Examples
///
/// ```
/// use relnorm_core::NormalForm;
///
/// assert!(NormalForm::BoyceCodd > NormalForm::Third);
/// assert_eq!(NormalForm::Second.to_string(), "2NF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NormalForm {
    #[serde(rename = "1NF")]
    First,
    #[serde(rename = "2NF")]
    Second,
    #[serde(rename = "3NF")]
    Third,
    #[serde(rename = "BCNF")]
    BoyceCodd,
}

impl NormalForm {
    /// Short label (`1NF`, `2NF`, `3NF`, `BCNF`).
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "1NF",
            Self::Second => "2NF",
            Self::Third => "3NF",
            Self::BoyceCodd => "BCNF",
        }
    }
}

impl fmt::Display for NormalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(labels: &[&str]) -> AttributeSet {
        labels.iter().copied().collect()
    }

    #[test]
    fn test_attribute_set_equality_ignores_order() {
        assert_eq!(set(&["B", "A", "C"]), set(&["C", "A", "B"]));
        assert_eq!(set(&["A", "A"]).len(), 1);
    }

    #[test]
    fn test_attribute_set_display_is_sorted() {
        assert_eq!(set(&["C", "A"]).to_string(), "{A, C}");
        assert_eq!(AttributeSet::new().to_string(), "{}");
    }

    #[test]
    fn test_attributes_are_case_sensitive() {
        let s = set(&["a"]);
        assert!(s.contains("a"));
        assert!(!s.contains("A"));
    }

    #[test]
    fn test_dependency_rejects_empty_sides() {
        assert_eq!(
            FunctionalDependency::new(AttributeSet::new(), set(&["A"])),
            Err(AnalysisError::EmptyInput("left-hand attributes"))
        );
        assert_eq!(
            FunctionalDependency::new(set(&["A"]), AttributeSet::new()),
            Err(AnalysisError::EmptyInput("right-hand attributes"))
        );
    }

    #[test]
    fn test_dependency_singletons_split_right_side() {
        let fd = FunctionalDependency::new(set(&["A"]), set(&["B", "C"])).unwrap();
        let split: Vec<String> = fd.singletons().map(|d| d.to_string()).collect();
        assert_eq!(split, vec!["{A} → {B}", "{A} → {C}"]);
    }

    #[test]
    fn test_trivial_dependency_detection() {
        let fd = FunctionalDependency::new(set(&["A", "B"]), set(&["A"])).unwrap();
        assert!(fd.is_trivial());
    }

    #[test]
    fn test_dependency_deserialize_rejects_empty_side() {
        let json = r#"{"left": [], "right": ["A"]}"#;
        assert!(serde_json::from_str::<FunctionalDependency>(json).is_err());

        let json = r#"{"left": ["A"], "right": ["B"]}"#;
        let fd: FunctionalDependency = serde_json::from_str(json).unwrap();
        assert_eq!(fd.to_string(), "{A} → {B}");
    }

    #[test]
    fn test_schema_requires_attributes_and_dependencies() {
        let fd = FunctionalDependency::new(set(&["A"]), set(&["B"])).unwrap();
        assert_eq!(
            Schema::new(AttributeSet::new(), vec![fd]),
            Err(AnalysisError::EmptyInput("attributes"))
        );
        assert_eq!(
            Schema::new(set(&["A"]), Vec::new()),
            Err(AnalysisError::EmptyInput("functional dependencies"))
        );
    }

    #[test]
    fn test_schema_blank_name_is_dropped() {
        let schema = Schema::parse("A, B", "A -> B").unwrap().with_name("  ");
        assert_eq!(schema.name(), None);
        let schema = schema.with_name(" Enrollment ");
        assert_eq!(schema.name(), Some("Enrollment"));
    }

    #[test]
    fn test_normal_form_serializes_as_label() {
        let json = serde_json::to_string(&NormalForm::BoyceCodd).unwrap();
        assert_eq!(json, "\"BCNF\"");
        for form in [
            NormalForm::First,
            NormalForm::Second,
            NormalForm::Third,
            NormalForm::BoyceCodd,
        ] {
            assert_eq!(
                serde_json::to_string(&form).unwrap(),
                format!("\"{}\"", form.label())
            );
        }
    }
}
