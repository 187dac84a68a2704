//! Structured analysis reports.
//!
//! Each report is a plain serde document built from one or more core
//! analyses. [`analyze`] produces the full [`AnalysisReport`]; the smaller
//! reports back the single-purpose CLI subcommands.

use relnorm_core::{
    AttributePartition, AttributeSet, Classification, CoverTrace, FunctionalDependency,
    MissingDependencies, Relation, Schema, candidate_keys, classify, closure, compare,
    decompose_bcnf, minimal_cover_with_trace, prime_partition, superkeys, validate_schema,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::Result;

/// Closure of one attribute set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureReport {
    pub attributes: AttributeSet,
    pub closure: AttributeSet,
    /// Whether the closure is exactly the universe.
    pub is_superkey: bool,
}

/// Candidate keys, superkeys and the prime partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysReport {
    pub candidate_keys: Vec<AttributeSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superkeys: Option<Vec<AttributeSet>>,
    pub partition: AttributePartition,
}

/// A minimal cover, optionally with the per-pass trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverReport {
    pub minimal_cover: Vec<FunctionalDependency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<CoverTrace>,
}

/// BCNF sub-relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompositionReport {
    pub relations: Vec<Relation>,
}

/// Structural problems found in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub problems: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Equivalence of two dependency sets over one universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub attributes: AttributeSet,
    pub first: Vec<FunctionalDependency>,
    pub second: Vec<FunctionalDependency>,
    pub equivalent: bool,
    pub missing: MissingDependencies,
}

/// Every analysis of one schema in a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub attributes: AttributeSet,
    pub dependencies: Vec<FunctionalDependency>,
    pub keys: KeysReport,
    pub classification: Classification,
    pub cover: CoverReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decomposition: Option<DecompositionReport>,
}

/// Computes the closure of `attributes` under the schema's dependencies.
pub fn closure_report(schema: &Schema, attributes: &AttributeSet) -> Result<ClosureReport> {
    let reach = closure(attributes, schema.dependencies())?;
    let is_superkey = reach == *schema.attributes();
    Ok(ClosureReport {
        attributes: attributes.clone(),
        closure: reach,
        is_superkey,
    })
}

/// Finds keys, and superkeys when the configuration asks for them.
///
/// # Errors
///
/// Returns [`AttributeLimitExceeded`](crate::ReportError::AttributeLimitExceeded)
/// if the universe is larger than the configured key search limit.
pub fn keys_report(schema: &Schema, config: &AnalysisConfig) -> Result<KeysReport> {
    config.check_attribute_limit(schema.attributes().len())?;

    let keys = candidate_keys(schema.attributes(), schema.dependencies())?;
    keys_section(schema, config, keys)
}

fn keys_section(
    schema: &Schema,
    config: &AnalysisConfig,
    keys: Vec<AttributeSet>,
) -> Result<KeysReport> {
    let superkeys = if config.report.include_superkeys {
        Some(superkeys(schema.attributes(), schema.dependencies(), &keys)?)
    } else {
        None
    };
    let partition = prime_partition(schema.attributes(), &keys);

    Ok(KeysReport {
        candidate_keys: keys,
        superkeys,
        partition,
    })
}

/// Builds a minimal cover, keeping the trace when `with_steps` is set.
pub fn cover_report(schema: &Schema, with_steps: bool) -> Result<CoverReport> {
    let trace = minimal_cover_with_trace(schema.dependencies())?;
    Ok(CoverReport {
        minimal_cover: trace.cover.clone(),
        steps: with_steps.then_some(trace),
    })
}

/// Classifies the schema into its strictest normal form.
///
/// # Errors
///
/// Returns [`AttributeLimitExceeded`](crate::ReportError::AttributeLimitExceeded)
/// if the universe is larger than the configured key search limit.
pub fn classification_report(schema: &Schema, config: &AnalysisConfig) -> Result<Classification> {
    config.check_attribute_limit(schema.attributes().len())?;
    Ok(classify(schema.attributes(), schema.dependencies())?)
}

/// Decomposes the schema into BCNF.
pub fn decomposition_report(schema: &Schema) -> Result<DecompositionReport> {
    let relations = decompose_bcnf(schema.attributes(), schema.dependencies())?;
    Ok(DecompositionReport { relations })
}

/// Validates the schema without analysing it.
pub fn validation_report(schema: &Schema) -> ValidationReport {
    let problems = validate_schema(schema)
        .iter()
        .map(ToString::to_string)
        .collect();
    ValidationReport { problems }
}

/// Compares the schema's dependencies with `other` over the same universe.
pub fn comparison_report(
    schema: &Schema,
    other: &[FunctionalDependency],
) -> Result<ComparisonReport> {
    let comparison = compare(schema.dependencies(), other, schema.attributes())?;
    Ok(ComparisonReport {
        attributes: schema.attributes().clone(),
        first: schema.dependencies().to_vec(),
        second: other.to_vec(),
        equivalent: comparison.equivalent,
        missing: comparison.missing,
    })
}

/// Runs every analysis on `schema`.
///
/// Superkeys, cover steps and the decomposition are included according to
/// `config.report`.
///
/// # Errors
///
/// Returns [`AttributeLimitExceeded`](crate::ReportError::AttributeLimitExceeded)
/// if the universe is larger than the configured key search limit, and
/// [`Analysis`](crate::ReportError::Analysis) if any analysis fails.
///
/// # Examples
///
/// ```
/// use relnorm_core::{NormalForm, Schema};
/// use relnorm_report::{AnalysisConfig, analyze};
///
/// let schema = Schema::parse("A, B, C", "A -> B\nB -> C").unwrap();
/// let report = analyze(&schema, &AnalysisConfig::default()).unwrap();
///
/// assert_eq!(report.classification.normal_form, NormalForm::Second);
/// assert_eq!(report.keys.candidate_keys[0].to_string(), "{A}");
/// assert_eq!(report.decomposition.unwrap().relations.len(), 2);
/// ```
pub fn analyze(schema: &Schema, config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.check_attribute_limit(schema.attributes().len())?;

    let classification = classify(schema.attributes(), schema.dependencies())?;
    let keys = keys_section(schema, config, classification.candidate_keys.clone())?;
    let cover = cover_report(schema, config.report.include_cover_steps)?;
    let decomposition = if config.report.include_decomposition {
        Some(decomposition_report(schema)?)
    } else {
        None
    };

    debug!(
        name = schema.name().unwrap_or("<unnamed>"),
        attributes = schema.attributes().len(),
        dependencies = schema.dependencies().len(),
        normal_form = %classification.normal_form,
        "Analysed schema"
    );

    Ok(AnalysisReport {
        name: schema.name().map(str::to_string),
        attributes: schema.attributes().clone(),
        dependencies: schema.dependencies().to_vec(),
        keys,
        classification,
        cover,
        decomposition,
    })
}
