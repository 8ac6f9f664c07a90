mod catalog_file;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clargs_core::{
    ArgsParser, ArityMode, Catalog, Occurrence, OptionId, ParseOutcome, dangling_references,
};
use serde::Serialize;
use tracing::debug;

use crate::catalog_file::load_catalog;

/// Exit code for an argument list the catalog rejects.
const EXIT_PARSE_FAILED: i32 = 2;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "clargs")]
#[command(about = "Check option catalogs and inspect how argument lists parse")]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. debug, clargs_core=trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an argument list against a catalog and print the occurrences.
    Parse(ParseArgs),
    /// Validate a catalog file and list its options.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Catalog file (.json, .yaml or .yml).
    #[arg(long)]
    catalog: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Stop after this option: a short character, a long-only id, or a long name.
    #[arg(long)]
    halt_after: Option<String>,
    /// Arguments to parse, after `--`.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Catalog file (.json, .yaml or .yml).
    #[arg(long)]
    catalog: PathBuf,
}

/// Why a command failed.
#[derive(Debug)]
enum Failure {
    /// The parse itself rejected the arguments.
    Parse(String),
    Other(String),
}

impl Failure {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Parse(_) => EXIT_PARSE_FAILED,
            Self::Other(_) => 1,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Parse(message) | Self::Other(message) => message,
        }
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::Other(message)
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.parse().unwrap_or_default()),
        )
        .init();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Check(args) => run_check(args).map_err(Failure::from),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err.message());
        std::process::exit(err.exit_code());
    }
}

// ---------------------------------------------------------------------------
// parse command
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ParseReport {
    success: bool,
    occurrences: Vec<OccurrenceReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unparsed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct OccurrenceReport {
    /// `-f/--file` style name, absent for positional text.
    #[serde(skip_serializing_if = "Option::is_none")]
    option: Option<String>,
    id: Option<OptionId>,
    arguments: Vec<String>,
}

impl OccurrenceReport {
    fn new(catalog: &Catalog, occurrence: &Occurrence) -> Self {
        Self {
            option: occurrence.id.map(|id| catalog.describe(id)),
            id: occurrence.id,
            arguments: occurrence.arguments.clone(),
        }
    }
}

impl ParseReport {
    fn new(catalog: &Catalog, outcome: &ParseOutcome) -> Self {
        Self {
            success: outcome.is_success(),
            occurrences: outcome
                .occurrences()
                .iter()
                .map(|occurrence| OccurrenceReport::new(catalog, occurrence))
                .collect(),
            unparsed: outcome.unparsed().to_vec(),
            error: outcome.error_message(),
        }
    }
}

fn run_parse(args: ParseArgs) -> Result<(), Failure> {
    let catalog = load_catalog(&args.catalog)?;
    let halt_after = args
        .halt_after
        .as_deref()
        .map(|reference| resolve_option_ref(&catalog, reference))
        .transpose()?;

    debug!(
        catalog = %args.catalog.display(),
        args = args.args.len(),
        halt_after = ?halt_after,
        "Running parse"
    );

    let mut parser = ArgsParser::new(&catalog);
    if let Some(stop) = halt_after {
        parser = parser.halt_when(move |last| last == Some(stop));
    }
    let outcome = parser.parse(&args.args);

    let report = ParseReport::new(&catalog, &outcome);
    println!("{}", format_report(&report, args.format)?);

    match outcome.error_message() {
        Some(message) => Err(Failure::Parse(message)),
        None => Ok(()),
    }
}

/// Resolves an option reference such as `f`, `-f`, `1000`, `file` or `--file`.
fn resolve_option_ref(catalog: &Catalog, reference: &str) -> Result<OptionId, String> {
    let reference = reference.trim_start_matches('-');
    let mut chars = reference.chars();
    let id = match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(OptionId::Short(ch)),
        _ => match reference.parse::<u32>() {
            Ok(number) => Some(OptionId::LongOnly(number)),
            Err(_) => catalog
                .by_long_name(reference)
                .map(|descriptor| descriptor.id()),
        },
    };

    id.filter(|id| catalog.by_id(*id).is_some())
        .ok_or_else(|| format!("Unknown option reference '{reference}'"))
}

fn format_report(report: &ParseReport, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

// ---------------------------------------------------------------------------
// check command
// ---------------------------------------------------------------------------

fn run_check(args: CheckArgs) -> Result<(), String> {
    let catalog = load_catalog(&args.catalog)?;

    for descriptor in &catalog {
        println!(
            "{:<24} {:<10} {}",
            descriptor.display_name(),
            arity_label(descriptor.arity()),
            descriptor.description().unwrap_or_default()
        );
    }

    let dangling = dangling_references(&catalog);
    for (owner, missing) in &dangling {
        eprintln!(
            "warning: {} lists undefined option {missing} as incompatible",
            catalog.describe(*owner)
        );
    }

    println!(
        "Validated {} option(s) in '{}'.",
        catalog.len(),
        args.catalog.display()
    );
    Ok(())
}

fn arity_label(arity: ArityMode) -> &'static str {
    match arity {
        ArityMode::Disallowed => "none",
        ArityMode::Optional => "optional",
        ArityMode::Required => "required",
        ArityMode::RequiresTwo => "key=value",
    }
}
