// crates/rpc-schema/src/argument.rs
// ============================================================================
// Module: Argument Schemas
// Description: Recursive JSON Schema builder for argument descriptor trees.
// Purpose: Preserve types, optionality, nesting, and alias names exactly.
// Dependencies: rpc-schema-core, serde_json, crate::type_mapper
// ============================================================================

//! ## Overview
//! [`argument_schema`] turns one argument node into a schema fragment and
//! recurses into composite children:
//! - `ARRAY` children become positional `items` (tuple semantics).
//! - `OBJECT_USER_KEYS` has one child, used as the `additionalProperties` schema.
//! - `OBJECT` / `OBJECT_NAMED_PARAMS` children fan out into `properties`, one entry per alias,
//!   with `additionalProperties: false`.
//!
//! Alias fan-out builds each child schema once and clones it per alias, so
//! every property key owns an independent value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rpc_schema_core::ArgumentDescriptor;
use rpc_schema_core::ArgumentType;
use serde_json::Map;
use serde_json::Value;

use crate::SchemaError;
use crate::type_mapper::schema_type;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Pattern attached to `STRING_HEX` arguments.
///
/// Kept byte-for-byte as published by the registry's reference schema. Note
/// that it does not describe generic hex pairs: each repeated group is one
/// digit followed by two lowercase letters `a-f` (so `"00ff"` does not match).
pub const HEX_STRING_PATTERN: &str = "^([0-9][a-f]{2})+$";

/// `format` value attached to `OBJECT_NAMED_PARAMS` arguments.
pub const NAMED_PARAMS_FORMAT: &str = "named";

// ============================================================================
// SECTION: Argument Schema
// ============================================================================

/// Builds the schema fragment for one argument node.
///
/// `scope` is the dotted path of the node, used only for error reporting.
/// Alias handling for the node itself belongs to the caller.
///
/// # Errors
///
/// Returns [`SchemaError`] when the node or any descendant violates the
/// descriptor contract (children on a scalar, array without items, user-keys
/// object without exactly one child, duplicate or empty aliases).
pub fn argument_schema(argument: &ArgumentDescriptor, scope: &str) -> Result<Value, SchemaError> {
    let mut schema = Map::new();
    if !argument.description.is_empty() {
        schema.insert("description".to_string(), Value::String(argument.description.clone()));
    }
    schema.insert("type".to_string(), schema_type(argument.arg_type));
    match argument.arg_type {
        ArgumentType::StringHex => {
            schema.insert("pattern".to_string(), Value::String(HEX_STRING_PATTERN.to_string()));
        }
        ArgumentType::ObjectNamedParams => {
            schema.insert("format".to_string(), Value::String(NAMED_PARAMS_FORMAT.to_string()));
        }
        _ => {}
    }
    insert_members(&mut schema, argument, scope)?;
    Ok(Value::Object(schema))
}

/// Inserts the child-derived keywords for composite arguments.
fn insert_members(
    schema: &mut Map<String, Value>,
    argument: &ArgumentDescriptor,
    scope: &str,
) -> Result<(), SchemaError> {
    let children = argument.children.as_slice();
    match argument.arg_type {
        ArgumentType::Array => {
            if children.is_empty() {
                return Err(SchemaError::EmptyArrayItems {
                    scope: scope.to_string(),
                });
            }
            let items = children
                .iter()
                .enumerate()
                .map(|(index, child)| argument_schema(child, &format!("{scope}[{index}]")))
                .collect::<Result<Vec<_>, _>>()?;
            schema.insert("items".to_string(), Value::Array(items));
        }
        ArgumentType::ObjectUserKeys => {
            let [value_schema] = children else {
                return Err(SchemaError::UserKeysArity {
                    scope: scope.to_string(),
                    count: children.len(),
                });
            };
            let value_schema = argument_schema(value_schema, &format!("{scope}.*"))?;
            schema.insert("additionalProperties".to_string(), value_schema);
        }
        ArgumentType::Object | ArgumentType::ObjectNamedParams => {
            if !children.is_empty() {
                fan_out_properties(children, scope)?.insert_into(schema);
            }
        }
        ArgumentType::Amount
        | ArgumentType::Boolean
        | ArgumentType::Number
        | ArgumentType::Range
        | ArgumentType::String
        | ArgumentType::StringHex => {
            if !children.is_empty() {
                return Err(SchemaError::UnexpectedChildren {
                    scope: scope.to_string(),
                    arg_type: argument.arg_type,
                });
            }
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Alias Fan-Out
// ============================================================================

/// Object members produced by alias fan-out over a sibling scope.
#[derive(Debug, Default)]
pub(crate) struct PropertySet {
    /// Schema per alias.
    properties: Map<String, Value>,
    /// Aliases of required members, in declaration order.
    required: Vec<Value>,
}

impl PropertySet {
    /// Writes `properties`, `required` (when non-empty), and a closed
    /// `additionalProperties` into an object schema.
    pub(crate) fn insert_into(self, schema: &mut Map<String, Value>) {
        schema.insert("properties".to_string(), Value::Object(self.properties));
        if !self.required.is_empty() {
            schema.insert("required".to_string(), Value::Array(self.required));
        }
        schema.insert("additionalProperties".to_string(), Value::Bool(false));
    }
}

/// Builds one property per alias for a list of sibling arguments.
///
/// # Errors
///
/// Returns [`SchemaError::DuplicateAlias`] when two siblings share an alias,
/// and propagates any error raised while building a member schema.
pub(crate) fn fan_out_properties(
    arguments: &[ArgumentDescriptor],
    scope: &str,
) -> Result<PropertySet, SchemaError> {
    let mut members = PropertySet::default();
    for argument in arguments {
        let aliases = validated_aliases(argument, scope)?;
        let primary = aliases.first().map_or("", String::as_str);
        let schema = argument_schema(argument, &format!("{scope}.{primary}"))?;
        for alias in aliases {
            if members.properties.contains_key(alias) {
                return Err(SchemaError::DuplicateAlias {
                    scope: scope.to_string(),
                    alias: alias.clone(),
                });
            }
            members.properties.insert(alias.clone(), schema.clone());
            if argument.is_required() {
                members.required.push(Value::String(alias.clone()));
            }
        }
    }
    Ok(members)
}

/// Returns the alias list of an argument after checking it is usable as keys.
fn validated_aliases<'a>(
    argument: &'a ArgumentDescriptor,
    scope: &str,
) -> Result<&'a [String], SchemaError> {
    let aliases = argument.names.as_slice();
    if aliases.is_empty() {
        return Err(SchemaError::EmptyArgumentNames {
            scope: scope.to_string(),
        });
    }
    if aliases.iter().any(String::is_empty) {
        return Err(SchemaError::EmptyAlias {
            scope: scope.to_string(),
        });
    }
    Ok(aliases)
}
