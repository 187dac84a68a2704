//! Reports, configuration and output formatting for relnorm.
//!
//! This crate sits between [`relnorm_core`] and the `relnorm` binary:
//!
//! - [`AnalysisConfig`] is the YAML configuration (key search limit and
//!   optional report sections).
//! - [`analyze`] runs every analysis on a [`Schema`](relnorm_core::Schema)
//!   and returns an [`AnalysisReport`]. Smaller builders such as
//!   [`keys_report`] and [`comparison_report`] back the single-purpose
//!   subcommands.
//! - [`format_output`] renders any report as JSON, YAML, Markdown or an
//!   aligned plain-text table.
//!
//! # Example
//!
//! ```
//! use relnorm_core::Schema;
//! use relnorm_report::{AnalysisConfig, OutputFormat, analyze, format_output};
//!
//! let schema = Schema::parse("A, B, C", "A -> B\nB -> C").unwrap();
//! let report = analyze(&schema, &AnalysisConfig::default()).unwrap();
//!
//! let markdown = format_output(&report, OutputFormat::Markdown).unwrap();
//! assert!(markdown.contains("## Normal Form: 2NF"));
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod report;

pub use config::{AnalysisConfig, LimitsConfig, ReportSections};
pub use error::{ReportError, Result};
pub use output::{OutputFormat, Render, format_output};
pub use report::{
    AnalysisReport, ClosureReport, ComparisonReport, CoverReport, DecompositionReport, KeysReport,
    ValidationReport, analyze, classification_report, closure_report, comparison_report,
    cover_report, decomposition_report, keys_report, validation_report,
};
