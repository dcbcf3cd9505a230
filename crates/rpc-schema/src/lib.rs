// crates/rpc-schema/src/lib.rs
// ============================================================================
// Module: RPC Schema Library
// Description: JSON Schema generation for RPC command registries.
// Purpose: Turn registry descriptors into a deterministic schema document.
// Dependencies: rpc-schema-core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `rpc-schema` walks a command registry and emits one JSON Schema (Draft
//! 2020-12) per command describing the arguments it accepts. Generation is a
//! pure function of the registry: the walker borrows descriptors, never
//! mutates them, and produces byte-identical output for an unchanged registry.
//!
//! Registry metadata is trusted, developer-authored data. Structural defects in
//! it (duplicate aliases, malformed composite arguments, ambiguous command
//! registrations) abort generation with a [`SchemaError`]; no partial document
//! is ever returned.
//!
//! ## Index
//! - Schema tree: [`type_mapper`], [`argument`], [`command`], [`walker`]
//! - Artifacts: [`artifact`], [`snapshot`], [`audit`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod argument;
pub mod artifact;
pub mod audit;
pub mod command;
pub mod snapshot;
pub mod type_mapper;
pub mod walker;

// ============================================================================
// SECTION: Errors
// ============================================================================

use std::path::PathBuf;

use rpc_schema_core::ArgumentType;
use thiserror::Error;

/// Errors raised while generating, writing, or verifying schemas.
///
/// # Invariants
/// - Contract variants carry the dotted scope (`command.argument.child`) of the offending node.
/// - [`SchemaError::OutputPath`] always includes the offending path.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// An argument declares no alias names.
    #[error("argument without names at {scope}")]
    EmptyArgumentNames {
        /// Scope holding the argument.
        scope: String,
    },
    /// An argument declares an empty alias.
    #[error("empty alias in argument names at {scope}")]
    EmptyAlias {
        /// Scope holding the argument.
        scope: String,
    },
    /// Two sibling arguments share an alias.
    #[error("duplicate alias {alias} at {scope}")]
    DuplicateAlias {
        /// Scope holding the siblings.
        scope: String,
        /// Alias declared more than once.
        alias: String,
    },
    /// A non-composite argument declares children.
    #[error("{arg_type} argument at {scope} cannot have children")]
    UnexpectedChildren {
        /// Scope of the argument.
        scope: String,
        /// Declared argument type.
        arg_type: ArgumentType,
    },
    /// An array argument declares no item schemas.
    #[error("array argument at {scope} has no items")]
    EmptyArrayItems {
        /// Scope of the argument.
        scope: String,
    },
    /// A user-keys object does not declare exactly one value schema.
    #[error("user-keys object at {scope} has {count} children, expected exactly 1")]
    UserKeysArity {
        /// Scope of the argument.
        scope: String,
        /// Number of declared children.
        count: usize,
    },
    /// A command name is registered without entries.
    #[error("command {command} has no registered entry")]
    EmptyRegistration {
        /// Command name.
        command: String,
    },
    /// A command name is registered more than once.
    #[error("command {command} has {count} registered entries, expected exactly 1")]
    AmbiguousRegistration {
        /// Command name.
        command: String,
        /// Number of registered entries.
        count: usize,
    },
    /// Registry snapshot could not be loaded.
    #[error("registry snapshot error: {0}")]
    Snapshot(String),
    /// IO failure while writing or reading artifacts.
    #[error("io error: {0}")]
    Io(String),
    /// Serialization failure while rendering artifacts.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Output path invalid or inaccessible.
    #[error("invalid output path: {0}")]
    OutputPath(PathBuf),
    /// On-disk artifact differs from the generated one.
    #[error("schema artifact mismatch: {0}")]
    Mismatch(String),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use argument::argument_schema;
pub use artifact::SchemaArtifact;
pub use artifact::SchemaBuilder;
pub use audit::SchemaAuditEvent;
pub use audit::SchemaAuditSink;
pub use command::command_schema;
pub use snapshot::RegistrySnapshot;
pub use type_mapper::schema_type;
pub use walker::api_schema;
