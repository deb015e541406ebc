//! contractc CLI - Command-line interface
//!
//! Commands:
//!   generate - Emit validator units from a contract
//!   check    - Load a contract and report integrity problems
//!   ir       - Print the contract IR
//!   schema   - Print the JSON Schema of the IR, schema document or config

mod cli;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use contractc::Target;

/// Compile API contracts into runtime validators
#[derive(Parser, Debug)]
#[command(name = "contractc", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate validator units
    Generate(GenerateArgs),

    /// Check a contract for integrity problems
    Check {
        /// Contract document (.yaml, .yml) or IR (.json)
        contract: PathBuf,

        /// JSON output format
        #[arg(long)]
        json: bool,
    },

    /// Print the contract IR
    Ir {
        /// Contract document (.yaml, .yml) or IR (.json)
        contract: PathBuf,

        /// YAML instead of JSON
        #[arg(long)]
        yaml: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a JSON Schema
    Schema {
        /// Which schema to print
        #[arg(value_enum, default_value_t = SchemaKind::Ir)]
        kind: SchemaKind,
    },
}

/// Schemas `contractc schema` can print
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    /// Contract IR (`contractc ir` output, `.json` contracts)
    Ir,
    /// Schema document (`.yaml` contracts)
    Document,
    /// Project configuration (`contractc.yaml`)
    Config,
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Contract document (.yaml, .yml) or IR (.json)
    pub contract: PathBuf,

    /// Target language, repeatable (default from config: typescript)
    #[arg(short, long = "target", value_parser = parse_target)]
    pub targets: Vec<Target>,

    /// Output directory (default from config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Print units to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Omit the provenance header
    #[arg(long)]
    pub no_provenance: bool,

    /// Omit TypeScript type aliases
    #[arg(long)]
    pub no_types: bool,

    /// Skip Rust formatting
    #[arg(long)]
    pub no_format: bool,

    /// Configuration file (default: nearest contractc.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory with template overrides
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
}

fn parse_target(s: &str) -> Result<Target, String> {
    s.parse::<Target>().map_err(|e| e.to_string())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("contractc={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Generate(args) => cli::cmd_generate(&args),
        Command::Check { contract, json } => cli::cmd_check(&contract, json),
        Command::Ir {
            contract,
            yaml,
            output,
        } => cli::cmd_ir(&contract, yaml, output.as_deref()),
        Command::Schema { kind } => cli::cmd_schema(kind),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
