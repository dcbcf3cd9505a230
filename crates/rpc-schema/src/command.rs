// crates/rpc-schema/src/command.rs
// ============================================================================
// Module: Command Schemas
// Description: Per-command schema documents with argument JSON Schemas.
// Purpose: Pair command metadata with a standalone arguments schema.
// Dependencies: rpc-schema-core, serde_json, crate::argument
// ============================================================================

//! ## Overview
//! A command document carries `name`, `category`, `description`, optional
//! `examples`, and an `arguments` object that is itself a Draft 2020-12
//! schema with a per-command `$id`.

use rpc_schema_core::CommandDescriptor;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::SchemaError;
use crate::argument::fan_out_properties;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// JSON Schema dialect of every arguments schema.
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Host used in arguments schema `$id` URLs.
pub const SCHEMA_ID_HOST: &str = "bitcoincore.org";

/// Returns the `$id` of a command's arguments schema.
#[must_use]
pub fn arguments_schema_id(command_name: &str) -> String {
    format!("https://{SCHEMA_ID_HOST}/{command_name}-arguments.json")
}

// ============================================================================
// SECTION: Command Schema
// ============================================================================

/// Builds the schema document for one command.
///
/// # Errors
///
/// Returns [`SchemaError`] when any argument violates the descriptor
/// contract, including duplicate aliases across top-level arguments.
pub fn command_schema(category: &str, command: &CommandDescriptor) -> Result<Value, SchemaError> {
    let mut document = Map::new();
    document.insert("name".to_string(), Value::String(command.name.clone()));
    document.insert("category".to_string(), Value::String(category.to_string()));
    document.insert("description".to_string(), Value::String(command.description.clone()));
    if !command.examples.is_empty() {
        document.insert("examples".to_string(), json!(command.examples));
    }
    document.insert("arguments".to_string(), arguments_schema(command)?);
    Ok(Value::Object(document))
}

/// Builds the `arguments` schema of a command.
fn arguments_schema(command: &CommandDescriptor) -> Result<Value, SchemaError> {
    let mut schema = Map::new();
    schema.insert("$schema".to_string(), Value::String(SCHEMA_DIALECT.to_string()));
    schema.insert("$id".to_string(), Value::String(arguments_schema_id(&command.name)));
    schema.insert("type".to_string(), Value::String("object".to_string()));
    if !command.arguments.is_empty() {
        fan_out_properties(&command.arguments, &command.name)?.insert_into(&mut schema);
    }
    Ok(Value::Object(schema))
}
