// crates/rpc-schema/src/main.rs
// ============================================================================
// Module: RPC Schema CLI
// Description: CLI entrypoint for generating RPC argument schemas.
// Purpose: Generate, verify, or print the schema artifact for a registry snapshot.
// Dependencies: clap, rpc-schema, rpc-schema-config
// ============================================================================

//! ## Overview
//! The `rpc-schema` CLI loads a registry snapshot, renders the schema document
//! and either writes it, checks the on-disk copy for drift, or prints it.
//! Flags take precedence over `rpc-schema.toml`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use rpc_schema::RegistrySnapshot;
use rpc_schema::SchemaBuilder;
use rpc_schema::SchemaError;
use rpc_schema::audit::FileAuditSink;
use rpc_schema::audit::NoopAuditSink;
use rpc_schema::audit::SchemaAuditSink;
use rpc_schema::audit::StderrAuditSink;
use rpc_schema_config::AuditConfig;
use rpc_schema_config::ConfigError;
use rpc_schema_config::RpcSchemaConfig;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Schema generator CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "rpc-schema", about = "Generate JSON Schemas for RPC command arguments.")]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the schema artifact.
    Generate {
        /// Registry and config inputs.
        #[command(flatten)]
        inputs: Inputs,
        /// Output directory for the artifact.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Verify the on-disk artifact matches the registry.
    Check {
        /// Registry and config inputs.
        #[command(flatten)]
        inputs: Inputs,
        /// Output directory containing the artifact.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Print the schema document to stdout.
    Print {
        /// Registry and config inputs.
        #[command(flatten)]
        inputs: Inputs,
    },
}

/// Inputs shared by every subcommand.
#[derive(Debug, Args)]
struct Inputs {
    /// Registry snapshot (JSON) to generate from.
    #[arg(long, value_name = "FILE")]
    registry: Option<PathBuf>,
    /// Configuration file (defaults to `RPC_SCHEMA_CONFIG` or rpc-schema.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// CLI failures.
#[derive(Debug, Error)]
enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Schema generation, writing, or verification failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Neither the flag nor the config names a registry snapshot.
    #[error("no registry snapshot given: pass --registry or set registry.snapshot")]
    MissingRegistry,
    /// Audit log could not be opened.
    #[error("audit log error: {0}")]
    Audit(String),
    /// Stdout could not be written.
    #[error("output error: {0}")]
    Output(String),
}

// ============================================================================
// SECTION: CLI Execution
// ============================================================================

/// CLI entrypoint.
fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

/// Executes the CLI command.
fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let inputs = cli.inputs();
    let config = RpcSchemaConfig::load(inputs.config.as_deref())?;
    let registry_path = inputs
        .registry
        .clone()
        .or_else(|| config.registry.snapshot.clone())
        .ok_or(CliError::MissingRegistry)?;
    let registry = RegistrySnapshot::load(&registry_path)?.into_registry();
    let builder = SchemaBuilder::new()
        .with_file_name(config.output.file_name.clone())
        .with_audit_sink(audit_sink(&config.audit)?);
    let output_dir = cli.output_dir().unwrap_or_else(|| config.output.dir.clone());
    match cli.command {
        Command::Generate {
            ..
        } => {
            builder.write_to(&output_dir, registry.groups())?;
            Ok(())
        }
        Command::Check {
            ..
        } => {
            builder.verify_output(&output_dir, registry.groups())?;
            Ok(())
        }
        Command::Print {
            ..
        } => {
            let artifact = builder.build(registry.groups())?;
            let mut stdout = std::io::stdout();
            stdout.write_all(&artifact.bytes).map_err(|err| CliError::Output(err.to_string()))
        }
    }
}

/// Builds the audit sink described by the config.
fn audit_sink(audit: &AuditConfig) -> Result<Arc<dyn SchemaAuditSink>, CliError> {
    if !audit.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &audit.path {
        Some(path) => {
            let sink = FileAuditSink::new(path)
                .map_err(|err| CliError::Audit(format!("{}: {err}", path.display())))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

/// Reports CLI errors to stderr and returns a failure exit code.
fn report_error(err: &CliError) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{err}");
    ExitCode::FAILURE
}

// ============================================================================
// SECTION: CLI Helpers
// ============================================================================

impl Cli {
    /// Returns the shared inputs of the selected subcommand.
    const fn inputs(&self) -> &Inputs {
        match &self.command {
            Command::Generate {
                inputs, ..
            }
            | Command::Check {
                inputs, ..
            }
            | Command::Print {
                inputs,
            } => inputs,
        }
    }

    /// Returns the output directory from flags, if any.
    #[must_use]
    fn output_dir(&self) -> Option<PathBuf> {
        match &self.command {
            Command::Generate {
                out, ..
            }
            | Command::Check {
                out, ..
            } => out.clone(),
            Command::Print {
                ..
            } => None,
        }
    }
}
