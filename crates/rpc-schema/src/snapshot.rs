// crates/rpc-schema/src/snapshot.rs
// ============================================================================
// Module: Registry Snapshots
// Description: Loads command registries from JSON snapshot files.
// Purpose: Let the CLI generate schemas for registries dumped to disk.
// Dependencies: rpc-schema-core, serde, serde_json
// ============================================================================

//! ## Overview
//! A registry snapshot is a JSON file listing commands with their category and
//! descriptor fields:
//!
//! ```json
//! { "commands": [ { "category": "wallet", "name": "foo", "arguments": [
//!     { "names": "amount", "type": "AMOUNT", "fallback": { "policy": "required" } }
//! ] } ] }
//! ```
//!
//! Parsing is strict about types and keys (unknown type tags and misspelled
//! fields fail) and bounded in size.
//! Structural rules are left to the generator, so a snapshot that parses can
//! still be rejected when schemas are built.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Read;
use std::path::Path;

use rpc_schema_core::ArgumentDescriptor;
use rpc_schema_core::CommandDescriptor;
use rpc_schema_core::CommandRegistry;
use serde::Deserialize;
use serde::Serialize;

use crate::SchemaError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum registry snapshot size accepted by the loader.
pub const MAX_SNAPSHOT_BYTES: u64 = 8 * 1024 * 1024;

// ============================================================================
// SECTION: Snapshot Types
// ============================================================================

/// One registered command in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotCommand {
    /// Category the command is listed under.
    pub category: String,
    /// Command name.
    pub name: String,
    /// Command help text.
    #[serde(default)]
    pub description: String,
    /// Usage examples, in declaration order.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Top-level arguments, in declaration order.
    #[serde(default)]
    pub arguments: Vec<ArgumentDescriptor>,
}

impl SnapshotCommand {
    /// Splits the entry into its category and command descriptor.
    #[must_use]
    pub fn into_parts(self) -> (String, CommandDescriptor) {
        let descriptor = CommandDescriptor {
            name: self.name,
            description: self.description,
            examples: self.examples,
            arguments: self.arguments,
        };
        (self.category, descriptor)
    }
}

/// Registry snapshot file contents.
///
/// # Invariants
/// - `commands` keeps file order; grouping by name happens in [`Self::into_registry`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySnapshot {
    /// Registered commands.
    #[serde(default)]
    pub commands: Vec<SnapshotCommand>,
}

impl RegistrySnapshot {
    /// Loads a snapshot from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Io`] when the file cannot be read and
    /// [`SchemaError::Snapshot`] when it is too large or malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let bytes = read_snapshot_bytes(path.as_ref())?;
        Self::from_slice(&bytes)
    }

    /// Parses a snapshot from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Snapshot`] when the bytes are not a valid snapshot.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SchemaError> {
        serde_json::from_slice(bytes).map_err(|err| SchemaError::Snapshot(err.to_string()))
    }

    /// Converts the snapshot into a registry grouped by command name.
    ///
    /// Commands sharing a name end up in the same group.
    #[must_use]
    pub fn into_registry(self) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for command in self.commands {
            let (category, descriptor) = command.into_parts();
            registry.register_descriptor(category, descriptor);
        }
        registry
    }
}

/// Reads snapshot bytes, refusing files above [`MAX_SNAPSHOT_BYTES`].
fn read_snapshot_bytes(path: &Path) -> Result<Vec<u8>, SchemaError> {
    let file = fs::File::open(path)
        .map_err(|err| SchemaError::Io(format!("{}: {err}", path.display())))?;
    let metadata = file.metadata().map_err(|err| SchemaError::Io(err.to_string()))?;
    if metadata.len() > MAX_SNAPSHOT_BYTES {
        return Err(SchemaError::Snapshot(format!(
            "snapshot exceeds {MAX_SNAPSHOT_BYTES} bytes"
        )));
    }
    let mut bytes = Vec::new();
    file.take(MAX_SNAPSHOT_BYTES + 1)
        .read_to_end(&mut bytes)
        .map_err(|err| SchemaError::Io(err.to_string()))?;
    if !u64::try_from(bytes.len()).is_ok_and(|size| size <= MAX_SNAPSHOT_BYTES) {
        return Err(SchemaError::Snapshot(format!(
            "snapshot exceeds {MAX_SNAPSHOT_BYTES} bytes"
        )));
    }
    Ok(bytes)
}
