//! Output formatting for analysis reports.

use std::fmt::Display;

use relnorm_core::{Classification, CoverEvent, FunctionalDependency, Relation};
use serde::Serialize;

use crate::error::Result;
use crate::report::{
    AnalysisReport, ClosureReport, ComparisonReport, CoverReport, DecompositionReport, KeysReport,
    ValidationReport,
};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Human-readable renderings of a report.
pub trait Render {
    fn to_markdown(&self) -> String;
    fn to_table(&self) -> String;
}

/// Formats a report in the requested output format.
///
/// # Examples
///
/// ```
/// use relnorm_core::{Schema, parse_attributes};
/// use relnorm_report::{OutputFormat, closure_report, format_output};
///
/// let schema = Schema::parse("A, B", "A -> B").unwrap();
/// let report = closure_report(&schema, &parse_attributes("A").unwrap()).unwrap();
/// let table = format_output(&report, OutputFormat::Table).unwrap();
/// assert!(table.contains("{A, B}"));
/// ```
pub fn format_output<T>(report: &T, format: OutputFormat) -> Result<String>
where
    T: Serialize + Render,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        OutputFormat::Markdown => Ok(report.to_markdown()),
        OutputFormat::Table => Ok(report.to_table()),
    }
}

const LABEL_WIDTH: usize = 16;

fn row(out: &mut String, label: &str, value: impl Display) {
    out.push_str(&format!("{:<width$}{value}\n", format!("{label}:"), width = LABEL_WIDTH));
}

fn join<T: Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn bullets<T: Display>(out: &mut String, items: &[T]) {
    if items.is_empty() {
        out.push_str("_none_\n");
    }
    for item in items {
        out.push_str(&format!("- `{item}`\n"));
    }
    out.push('\n');
}

fn dependency_lines(out: &mut String, dependencies: &[FunctionalDependency]) {
    if dependencies.is_empty() {
        out.push_str("  (none)\n");
    }
    for fd in dependencies {
        out.push_str(&format!("  {fd}\n"));
    }
}

fn describe_event(event: &CoverEvent) -> String {
    match event {
        CoverEvent::DuplicateDropped { dependency } => format!("dropped duplicate {dependency}"),
        CoverEvent::LeftAttributeRemoved {
            dependency,
            attribute,
        } => format!("removed {attribute} from the left side of {dependency}"),
        CoverEvent::RedundantDependencyRemoved { dependency } => {
            format!("removed redundant {dependency}")
        }
    }
}

fn relation_label(index: usize, relation: &Relation) -> String {
    format!("R{} {}", index + 1, relation.attributes)
}

impl Render for ClosureReport {
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Closure of `{}`\n\n", self.attributes));
        out.push_str(&format!("- **Closure:** `{}`\n", self.closure));
        out.push_str(&format!(
            "- **Superkey:** {}\n",
            if self.is_superkey { "yes" } else { "no" }
        ));
        out
    }

    fn to_table(&self) -> String {
        let mut out = String::new();
        row(&mut out, "Attributes", &self.attributes);
        row(&mut out, "Closure", &self.closure);
        row(&mut out, "Superkey", if self.is_superkey { "yes" } else { "no" });
        out
    }
}

impl Render for KeysReport {
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("## Candidate Keys\n\n");
        bullets(&mut out, &self.candidate_keys);
        if let Some(ref superkeys) = self.superkeys {
            out.push_str("## Superkeys\n\n");
            bullets(&mut out, superkeys);
        }
        out.push_str(&format!("- **Prime:** `{}`\n", self.partition.prime));
        out.push_str(&format!("- **Non-prime:** `{}`\n", self.partition.non_prime));
        out
    }

    fn to_table(&self) -> String {
        let mut out = String::new();
        row(&mut out, "Candidate keys", join(&self.candidate_keys));
        if let Some(ref superkeys) = self.superkeys {
            row(&mut out, "Superkeys", join(superkeys));
        }
        row(&mut out, "Prime", &self.partition.prime);
        row(&mut out, "Non-prime", &self.partition.non_prime);
        out
    }
}

impl Render for CoverReport {
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("## Minimal Cover\n\n");
        bullets(&mut out, &self.minimal_cover);
        if let Some(ref steps) = self.steps {
            out.push_str("### Singleton Right Sides\n\n");
            bullets(&mut out, &steps.decomposed);
            out.push_str("### Reduced Left Sides\n\n");
            bullets(&mut out, &steps.left_reduced);
            if !steps.events.is_empty() {
                out.push_str("### Reductions\n\n");
                for event in &steps.events {
                    out.push_str(&format!("- {}\n", describe_event(event)));
                }
                out.push('\n');
            }
        }
        out
    }

    fn to_table(&self) -> String {
        let mut out = String::new();
        out.push_str("Minimal cover:\n");
        dependency_lines(&mut out, &self.minimal_cover);
        if let Some(ref steps) = self.steps {
            out.push_str("\nSingleton right sides:\n");
            dependency_lines(&mut out, &steps.decomposed);
            out.push_str("\nReduced left sides:\n");
            dependency_lines(&mut out, &steps.left_reduced);
            if !steps.events.is_empty() {
                out.push_str("\nReductions:\n");
                for event in &steps.events {
                    out.push_str(&format!("  {}\n", describe_event(event)));
                }
            }
        }
        out
    }
}

impl Render for Classification {
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("## Normal Form: {}\n\n", self.normal_form));
        out.push_str(&format!("- **Candidate keys:** {}\n", join(&self.candidate_keys)));
        out.push_str(&format!("- **Prime:** `{}`\n", self.partition.prime));
        out.push_str(&format!("- **Non-prime:** `{}`\n\n", self.partition.non_prime));
        if !self.violations.is_empty() {
            out.push_str("| Form | Violating dependency |\n");
            out.push_str("|------|----------------------|\n");
            for violation in &self.violations {
                out.push_str(&format!(
                    "| {} | `{}` |\n",
                    violation.form, violation.dependency
                ));
            }
            out.push('\n');
        }
        out
    }

    fn to_table(&self) -> String {
        let mut out = String::new();
        row(&mut out, "Normal form", self.normal_form);
        row(&mut out, "Candidate keys", join(&self.candidate_keys));
        row(&mut out, "Prime", &self.partition.prime);
        row(&mut out, "Non-prime", &self.partition.non_prime);
        if !self.violations.is_empty() {
            out.push_str("\nViolations:\n");
            for violation in &self.violations {
                out.push_str(&format!(
                    "  {:<6}{}\n",
                    violation.form.label(),
                    violation.dependency
                ));
            }
        }
        out
    }
}

impl Render for DecompositionReport {
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("## BCNF Decomposition\n\n");
        for (index, relation) in self.relations.iter().enumerate() {
            out.push_str(&format!("### {}\n\n", relation_label(index, relation)));
            bullets(&mut out, &relation.dependencies);
        }
        out
    }

    fn to_table(&self) -> String {
        let mut out = String::new();
        for (index, relation) in self.relations.iter().enumerate() {
            out.push_str(&format!("{}\n", relation_label(index, relation)));
            dependency_lines(&mut out, &relation.dependencies);
        }
        out
    }
}

impl Render for ValidationReport {
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Validation\n\n");
        if self.is_valid() {
            out.push_str("No problems found.\n");
        }
        for problem in &self.problems {
            out.push_str(&format!("- {problem}\n"));
        }
        out
    }

    fn to_table(&self) -> String {
        if self.is_valid() {
            return "OK: no problems found\n".to_string();
        }
        self.problems
            .iter()
            .map(|problem| format!("error: {problem}\n"))
            .collect()
    }
}

impl Render for ComparisonReport {
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Comparison over `{}`\n\n", self.attributes));
        out.push_str(&format!(
            "- **Equivalent:** {}\n\n",
            if self.equivalent { "yes" } else { "no" }
        ));
        out.push_str("## First Set\n\n");
        bullets(&mut out, &self.first);
        out.push_str("## Second Set\n\n");
        bullets(&mut out, &self.second);
        out.push_str("## In First, Not Implied by Second\n\n");
        bullets(&mut out, &self.missing.from_first_to_second);
        out.push_str("## In Second, Not Implied by First\n\n");
        bullets(&mut out, &self.missing.from_second_to_first);
        out
    }

    fn to_table(&self) -> String {
        let mut out = String::new();
        row(&mut out, "Attributes", &self.attributes);
        row(&mut out, "Equivalent", if self.equivalent { "yes" } else { "no" });
        out.push_str("\nFirst set:\n");
        dependency_lines(&mut out, &self.first);
        out.push_str("\nSecond set:\n");
        dependency_lines(&mut out, &self.second);
        if !self.equivalent {
            out.push_str("\nNot implied by second:\n");
            dependency_lines(&mut out, &self.missing.from_first_to_second);
            out.push_str("\nNot implied by first:\n");
            dependency_lines(&mut out, &self.missing.from_second_to_first);
        }
        out
    }
}

impl Render for AnalysisReport {
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "# Relation {}\n\n",
            self.name.as_deref().unwrap_or("R")
        ));
        out.push_str(&format!("- **Attributes:** `{}`\n\n", self.attributes));
        out.push_str("## Functional Dependencies\n\n");
        bullets(&mut out, &self.dependencies);
        out.push_str(&self.keys.to_markdown());
        out.push('\n');
        out.push_str(&self.classification.to_markdown());
        out.push_str(&self.cover.to_markdown());
        if let Some(ref decomposition) = self.decomposition {
            out.push_str(&decomposition.to_markdown());
        }
        out
    }

    fn to_table(&self) -> String {
        let mut out = String::new();
        if let Some(ref name) = self.name {
            row(&mut out, "Relation", name);
        }
        row(&mut out, "Attributes", &self.attributes);
        out.push_str("Dependencies:\n");
        dependency_lines(&mut out, &self.dependencies);
        out.push('\n');
        out.push_str(&self.keys.to_table());
        out.push('\n');
        out.push_str(&self.classification.to_table());
        out.push('\n');
        out.push_str(&self.cover.to_table());
        if let Some(ref decomposition) = self.decomposition {
            out.push_str("\nBCNF decomposition:\n");
            out.push_str(&decomposition.to_table());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use relnorm_core::{Schema, parse_dependencies};

    use super::*;
    use crate::config::AnalysisConfig;
    use crate::report::{analyze, comparison_report, cover_report, validation_report};

    fn sample_report() -> AnalysisReport {
        let schema = Schema::parse("A, B, C", "A -> B\nB -> C")
            .unwrap()
            .with_name("orders");
        analyze(&schema, &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_format_analysis_json() {
        let json = format_output(&sample_report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "orders");
        assert_eq!(value["classification"]["normal_form"], "2NF");
        assert_eq!(value["keys"]["candidate_keys"][0][0], "A");
        assert_eq!(value["cover"]["minimal_cover"][0]["left"][0], "A");
    }

    #[test]
    fn test_format_analysis_yaml_roundtrip() {
        let report = sample_report();
        let yaml = format_output(&report, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("name: orders"));
        let parsed: AnalysisReport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_format_analysis_markdown() {
        let md = format_output(&sample_report(), OutputFormat::Markdown).unwrap();
        assert!(md.starts_with("# Relation orders"));
        assert!(md.contains("## Normal Form: 2NF"));
        assert!(md.contains("| BCNF | `{B} → {C}` |"));
        assert!(md.contains("## BCNF Decomposition"));
        assert!(md.contains("### R1 {B, C}"));
    }

    #[test]
    fn test_format_analysis_table() {
        let table = format_output(&sample_report(), OutputFormat::Table).unwrap();
        assert!(table.contains("Relation:       orders"));
        assert!(table.contains("Normal form:    2NF"));
        assert!(table.contains("Candidate keys: {A}"));
        assert!(table.contains("  3NF   {B} → {C}"));
    }

    #[test]
    fn test_cover_table_lists_reductions() {
        let schema = Schema::parse("A, B, C", "A -> B, C\nB -> C").unwrap();
        let report = cover_report(&schema, true).unwrap();
        let table = report.to_table();
        assert!(table.contains("Reductions:\n  removed redundant {A} → {C}\n"));
    }

    #[test]
    fn test_comparison_markdown_sections() {
        let schema = Schema::parse("A, B", "A -> B").unwrap();
        let other = parse_dependencies("A -> B\nB -> A").unwrap();
        let report = comparison_report(&schema, &other).unwrap();
        let md = report.to_markdown();
        assert!(md.contains("- **Equivalent:** no"));
        assert!(md.contains("## In Second, Not Implied by First\n\n- `{B} → {A}`"));
    }

    #[test]
    fn test_validation_table() {
        let valid = Schema::parse("A, B", "A -> B").unwrap();
        assert_eq!(validation_report(&valid).to_table(), "OK: no problems found\n");

        let invalid = Schema::parse("A, B", "A -> A").unwrap();
        assert_eq!(
            validation_report(&invalid).to_table(),
            "error: trivial dependency: {A} → {A}\n"
        );
    }
}
