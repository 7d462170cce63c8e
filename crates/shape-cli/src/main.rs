//! # shape-cli
//!
//! Command-line front end for checking JSON and YAML documents against
//! declarative schemas.

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::{CliConfig, OutputFormat, is_yaml};
use serde_json::{Value, json};
use shape_schema::{Schema, SchemaLoader};
use shape_validation::{ValidationError, compile};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shape")]
#[command(about = "Schema validation for JSON and YAML documents")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory searched for schemas referenced by name (repeatable)
    #[arg(long = "schema-path", global = true)]
    schema_paths: Vec<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a document against a schema
    Validate {
        /// Document file path (YAML for .yaml/.yml, JSON otherwise)
        input: PathBuf,

        /// Schema file path, or schema name looked up in the search paths
        #[arg(short, long)]
        schema: String,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Load and compile a schema without validating anything
    Check {
        /// Schema file path or schema name
        schema: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(CliConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.log_filter);

    match run(cli, &config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, config: &CliConfig) -> anyhow::Result<ExitCode> {
    let loader = SchemaLoader::new(config.search_paths(&cli.schema_paths));

    match cli.command {
        Commands::Validate {
            input,
            schema,
            format,
        } => {
            tracing::info!("Validating {} against {}", input.display(), schema);
            validate_command(&loader, &input, &schema, format.unwrap_or(config.format))
        }
        Commands::Check { schema } => {
            tracing::info!("Checking schema {}", schema);
            check_command(&loader, &schema)
        }
    }
}

fn validate_command(
    loader: &SchemaLoader,
    input: &Path,
    reference: &str,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let schema = load_schema(loader, reference)?;
    let validator = compile(&schema)
        .with_context(|| format!("Schema '{}' is misconfigured", schema.name))?;
    let document = read_document(input)?;

    match validator.validate(&document) {
        Ok(()) => {
            print_valid(format);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_invalid(format, &err)?;
            Ok(ExitCode::from(1))
        }
    }
}

fn check_command(loader: &SchemaLoader, reference: &str) -> anyhow::Result<ExitCode> {
    let schema = load_schema(loader, reference)?;
    let validator = compile(&schema)
        .with_context(|| format!("Schema '{}' is misconfigured", schema.name))?;

    println!(
        "Schema '{}' OK ({} top-level fields)",
        validator.name(),
        validator.children().len()
    );
    Ok(ExitCode::SUCCESS)
}

/// An existing file is loaded directly; anything else is a schema name
fn load_schema(loader: &SchemaLoader, reference: &str) -> anyhow::Result<Schema> {
    let path = Path::new(reference);
    let schema = if path.is_file() {
        loader.load_from_file(path)
    } else {
        loader.load(reference)
    };
    schema.with_context(|| format!("Failed to load schema '{reference}'"))
}

fn read_document(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;

    let document = if is_yaml(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse document {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse document {}", path.display()))?
    };
    Ok(document)
}

fn print_valid(format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("valid"),
        OutputFormat::Json => println!("{}", json!({"valid": true})),
    }
}

fn print_invalid(format: OutputFormat, err: &ValidationError) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("[{}] {}", err.kind, err),
        OutputFormat::Json => {
            let report = json!({"valid": false, "error": serde_json::to_value(err)?});
            println!("{report}");
        }
    }
    Ok(())
}
