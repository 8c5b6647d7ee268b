mod manifest;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use optparse::{OptionParser, tokenize};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

use crate::manifest::{DEFAULT_MANIFEST_NAME, Manifest, write_default_manifest};
use crate::report::{CheckReport, TokenReport};

/// Exit code for argument lists rejected by the declared options.
const USAGE_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "optparse")]
#[command(version, about = "Classify and validate command-line options", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter options manifest
    Init(InitArgs),

    /// Show how arguments are split into options and positionals
    Tokenize(TokenizeArgs),

    /// Validate arguments against the options declared in a manifest
    Check(CheckArgs),

    /// Print the option listing for a manifest
    List(ListArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Target directory (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Replace an existing manifest
    #[arg(long)]
    force: bool,
}

#[derive(Parser)]
struct TokenizeArgs {
    /// Output JSON instead of one line per token
    #[arg(long)]
    json: bool,

    /// Arguments to classify (after `--`)
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to the options manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,

    /// Output JSON instead of one line per match
    #[arg(long)]
    json: bool,

    /// Report undeclared options instead of failing
    #[arg(long)]
    allow_unknown: bool,

    /// Arguments to validate (after `--`)
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

#[derive(Parser)]
struct ListArgs {
    /// Path to the options manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Tokenize(args) => tokenize_command(args),
        Commands::Check(args) => check_command(args),
        Commands::List(args) => list_command(args),
    }
}

fn init(args: InitArgs) -> Result<ExitCode> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
    let dest = write_default_manifest(&dir, args.force)?;
    eprintln!("Created: {}", dest.display());
    Ok(ExitCode::SUCCESS)
}

fn tokenize_command(args: TokenizeArgs) -> Result<ExitCode> {
    tracing::debug!("executing tokenize command");

    let report = TokenReport::new(&tokenize(args.args));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(ExitCode::SUCCESS)
}

fn check_command(args: CheckArgs) -> Result<ExitCode> {
    tracing::debug!("executing check command");

    let descriptors = Manifest::from_file(&args.manifest)?
        .descriptors()
        .with_context(|| format!("invalid manifest: {}", args.manifest.display()))?;

    let mut parser = OptionParser::new(args.args);
    let mut ids = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        // The parser has already reported the error on stderr.
        let Ok(id) = parser.describe(descriptor) else {
            return Ok(ExitCode::from(USAGE_ERROR));
        };
        ids.push(id);
    }

    if !args.allow_unknown && parser.reject_unknown() {
        return Ok(ExitCode::from(USAGE_ERROR));
    }

    let report = CheckReport::collect(&mut parser, &ids);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(ExitCode::SUCCESS)
}

fn list_command(args: ListArgs) -> Result<ExitCode> {
    tracing::debug!("executing list command");

    let descriptors = Manifest::from_file(&args.manifest)?
        .descriptors()
        .with_context(|| format!("invalid manifest: {}", args.manifest.display()))?;

    let mut parser = OptionParser::new(Vec::<String>::new());
    for descriptor in descriptors {
        parser.describe(descriptor)?;
    }
    parser.print_help();
    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
