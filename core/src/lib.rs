//! Functional dependency analysis for relational schemas.
//!
//! This crate implements the classic normalization toolkit over a single
//! relation given as a set of attribute names (the *universe*) and a list of
//! functional dependencies:
//!
//! - [`closure`] and [`is_superkey`] compute attribute closures.
//! - [`candidate_keys`], [`superkeys`] and [`prime_partition`] find keys and
//!   split attributes into prime and non-prime.
//! - [`minimal_cover`] reduces a dependency list to an equivalent minimal one.
//! - [`classify`] reports the strictest normal form (1NF, 2NF, 3NF or BCNF)
//!   together with the violating dependencies.
//! - [`decompose_bcnf`] splits a relation into BCNF sub-relations.
//! - [`compare`] checks two dependency sets for equivalence.
//!
//! Schemas come from the plain-text format handled by [`parse_attributes`]
//! and [`parse_dependencies`]: a comma-separated attribute list and one
//! `A, B -> C` dependency per line. [`validate_schema`] flags dependencies
//! that do not fit their universe.
//!
//! # Example
//!
//! ```
//! use relnorm_core::*;
//!
//! let schema = Schema::parse("A, B, C, D, E", "A, B -> C\nC, D -> E\nB -> D\nE -> A").unwrap();
//!
//! let keys = candidate_keys(schema.attributes(), schema.dependencies()).unwrap();
//! assert_eq!(keys[0].to_string(), "{A, B}");
//!
//! let result = classify(schema.attributes(), schema.dependencies()).unwrap();
//! // B -> D is a partial dependency on the key {A, B}
//! assert_eq!(result.normal_form, NormalForm::First);
//!
//! let relations = decompose_bcnf(schema.attributes(), schema.dependencies()).unwrap();
//! assert!(relations.iter().all(|r| is_locally_bcnf(r).unwrap()));
//! ```

mod closure;
mod compare;
mod cover;
mod decompose;
mod error;
mod keys;
mod normal_form;
mod parse;
mod types;
mod validate;

pub use closure::{closure, is_superkey};
pub use compare::{Comparison, ImpliedDependencies, MissingDependencies, compare, equivalent, missing_dependencies};
pub use cover::{CoverEvent, CoverTrace, minimal_cover, minimal_cover_with_trace};
pub use decompose::{decompose_bcnf, is_locally_bcnf, project};
pub use error::{AnalysisError, ParseError, Result, Side};
pub use keys::{AttributePartition, candidate_keys, prime_partition, superkeys};
pub use normal_form::{
    Classification, Violation, classify, is_bcnf, is_second_normal_form, is_third_normal_form,
};
pub use parse::{ARROW, parse_attributes, parse_dependencies};
pub use types::*;
pub use validate::{ValidationError, validate_schema};
