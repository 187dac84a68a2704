use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use relnorm_core::{Schema, parse_attributes, parse_dependencies};
use relnorm_report::{
    AnalysisConfig, OutputFormat, Render, analyze, classification_report, closure_report,
    comparison_report, cover_report, decomposition_report, format_output, keys_report,
    validation_report,
};
use serde::Serialize;
use tracing::{Level, debug};

#[derive(Debug, Parser)]
#[command(name = "relnorm", version)]
#[command(about = "Functional dependency analysis and relational normalization")]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// YAML analysis configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the closure of an attribute set.
    Closure(ClosureArgs),
    /// List candidate keys, superkeys and prime attributes.
    Keys(SchemaArgs),
    /// Compute a minimal cover of the dependencies.
    Cover(CoverArgs),
    /// Report the strictest normal form and its violations.
    Classify(SchemaArgs),
    /// Decompose the relation into BCNF sub-relations.
    Decompose(SchemaArgs),
    /// Check whether two dependency sets are equivalent.
    Compare(CompareArgs),
    /// Run every analysis and print a full report.
    Analyze(SchemaArgs),
    /// Check the schema for unknown attributes, duplicates and trivial dependencies.
    Validate(SchemaArgs),
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Comma-separated attribute names (e.g. "A,B,C").
    #[arg(long)]
    attributes: String,
    /// File with one dependency per line ("A, B -> C"). Use `-` for stdin.
    #[arg(long)]
    fds: PathBuf,
    /// Relation name shown in reports.
    #[arg(long)]
    name: Option<String>,
}

#[derive(Debug, Args)]
struct ClosureArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Comma-separated attributes to take the closure of.
    #[arg(long)]
    of: String,
}

#[derive(Debug, Args)]
struct CoverArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Show the list after each pass and every reduction made.
    #[arg(long)]
    steps: bool,
}

#[derive(Debug, Args)]
struct CompareArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// File with the second dependency set. Use `-` for stdin.
    #[arg(long)]
    other: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Command::Closure(args) => run_closure(args, format),
        Command::Keys(args) => {
            let schema = load_schema(&args)?;
            let report = keys_report(&schema, &config).map_err(|e| e.to_string())?;
            emit(&report, format)
        }
        Command::Cover(args) => run_cover(args, format),
        Command::Classify(args) => {
            let schema = load_schema(&args)?;
            let report = classification_report(&schema, &config).map_err(|e| e.to_string())?;
            emit(&report, format)
        }
        Command::Decompose(args) => {
            let schema = load_schema(&args)?;
            let report = decomposition_report(&schema).map_err(|e| e.to_string())?;
            emit(&report, format)
        }
        Command::Compare(args) => run_compare(args, format),
        Command::Analyze(args) => {
            let schema = load_schema(&args)?;
            let report = analyze(&schema, &config).map_err(|e| e.to_string())?;
            emit(&report, format)
        }
        Command::Validate(args) => run_validate(args, format),
    }
}

fn run_closure(args: ClosureArgs, format: OutputFormat) -> Result<(), String> {
    let schema = load_schema(&args.schema)?;
    let start = parse_attributes(&args.of).map_err(|e| format!("--of: {e}"))?;
    let report = closure_report(&schema, &start).map_err(|e| e.to_string())?;
    emit(&report, format)
}

fn run_cover(args: CoverArgs, format: OutputFormat) -> Result<(), String> {
    let schema = load_schema(&args.schema)?;
    let report = cover_report(&schema, args.steps).map_err(|e| e.to_string())?;
    emit(&report, format)
}

fn run_compare(args: CompareArgs, format: OutputFormat) -> Result<(), String> {
    if is_stdin(&args.schema.fds) && is_stdin(&args.other) {
        return Err("--fds and --other cannot both read from stdin".to_string());
    }
    let schema = load_schema(&args.schema)?;
    let other_text = read_input(&args.other)?;
    let other = parse_dependencies(&other_text)
        .map_err(|e| format!("'{}': {e}", args.other.display()))?;

    let report = comparison_report(&schema, &other).map_err(|e| e.to_string())?;
    emit(&report, format)
}

fn run_validate(args: SchemaArgs, format: OutputFormat) -> Result<(), String> {
    let schema = load_schema(&args)?;
    let report = validation_report(&schema);
    emit(&report, format)?;

    if !report.is_valid() {
        return Err(format!("{} problem(s) found", report.problems.len()));
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, String> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let config = AnalysisConfig::load(path)
        .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?;
    debug!(
        path = %path.display(),
        max_key_search_attributes = config.limits.max_key_search_attributes,
        "Loaded configuration"
    );
    Ok(config)
}

fn load_schema(args: &SchemaArgs) -> Result<Schema, String> {
    let text = read_input(&args.fds)?;
    let schema = Schema::parse(&args.attributes, &text)
        .map_err(|e| format!("'{}': {e}", args.fds.display()))?;
    let schema = match args.name {
        Some(ref name) => schema.with_name(name.as_str()),
        None => schema,
    };
    debug!(
        attributes = schema.attributes().len(),
        dependencies = schema.dependencies().len(),
        "Loaded schema"
    );
    Ok(schema)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String, String> {
    if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|err| format!("Failed to read stdin: {err}"))?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(|err| format!("Failed to read '{}': {err}", path.display()))
}

fn emit<T>(report: &T, format: OutputFormat) -> Result<(), String>
where
    T: Serialize + Render,
{
    let raw = format_output(report, format).map_err(|e| e.to_string())?;
    if raw.ends_with('\n') {
        print!("{raw}");
    } else {
        println!("{raw}");
    }
    Ok(())
}
