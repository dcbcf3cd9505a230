// crates/rpc-schema/src/walker.rs
// ============================================================================
// Module: Registry Walker
// Description: Assembles the top-level schema document for a registry.
// Purpose: Resolve descriptors lazily and group command schemas by name.
// Dependencies: rpc-schema-core, serde_json, crate::command
// ============================================================================

//! ## Overview
//! The walker visits command names in registry order, resolves each entry's
//! descriptor on demand, and collects the command schemas into
//! `{ "commands": { "<name>": [<schema>, ...] } }`. Each name maps to a list so
//! multi-variant commands fit the document shape, but registrations are
//! currently required to be singular.

use rpc_schema_core::CommandEntry;
use rpc_schema_core::RegistryGroups;
use serde_json::Map;
use serde_json::Value;

use crate::SchemaError;
use crate::command::command_schema;

/// Builds the schema document for every command in the registry.
///
/// # Errors
///
/// Returns [`SchemaError::EmptyRegistration`] or
/// [`SchemaError::AmbiguousRegistration`] when a name does not map to exactly
/// one entry, and propagates any descriptor contract violation. Generation
/// stops at the first error.
pub fn api_schema<E: CommandEntry>(groups: &RegistryGroups<E>) -> Result<Value, SchemaError> {
    let mut commands = Map::new();
    for (name, entries) in groups {
        match entries.len() {
            0 => {
                return Err(SchemaError::EmptyRegistration {
                    command: name.clone(),
                });
            }
            1 => {}
            count => {
                return Err(SchemaError::AmbiguousRegistration {
                    command: name.clone(),
                    count,
                });
            }
        }
        let mut variants = Vec::with_capacity(entries.len());
        for entry in entries {
            let descriptor = entry.describe();
            variants.push(command_schema(entry.category(), &descriptor)?);
        }
        commands.insert(name.clone(), Value::Array(variants));
    }
    let mut document = Map::new();
    document.insert("commands".to_string(), Value::Object(commands));
    Ok(Value::Object(document))
}

#[cfg(test)]
mod tests;
