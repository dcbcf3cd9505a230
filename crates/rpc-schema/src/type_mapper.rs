// crates/rpc-schema/src/type_mapper.rs
// ============================================================================
// Module: Type Mapper
// Description: Maps argument type tags to JSON Schema `type` constraints.
// Purpose: Single lookup table for leaf type semantics.
// Dependencies: rpc-schema-core, serde_json
// ============================================================================

//! ## Overview
//! Each argument type tag maps to either a single JSON Schema type or an
//! ordered union. Union order is part of the output contract: `AMOUNT` is
//! `["number", "string"]` and `RANGE` is `["number", "array"]`.

use rpc_schema_core::ArgumentType;
use serde_json::Value;
use serde_json::json;

/// Returns the JSON Schema `type` value for an argument type tag.
///
/// The match is exhaustive; adding a tag to [`ArgumentType`] without mapping
/// it here does not compile.
#[must_use]
pub fn schema_type(arg_type: ArgumentType) -> Value {
    match arg_type {
        ArgumentType::Amount => json!(["number", "string"]),
        ArgumentType::Array => json!("array"),
        ArgumentType::Boolean => json!("boolean"),
        ArgumentType::Number => json!("number"),
        ArgumentType::Object | ArgumentType::ObjectNamedParams | ArgumentType::ObjectUserKeys => {
            json!("object")
        }
        ArgumentType::Range => json!(["number", "array"]),
        ArgumentType::String | ArgumentType::StringHex => json!("string"),
    }
}
