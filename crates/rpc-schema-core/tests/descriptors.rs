// crates/rpc-schema-core/tests/descriptors.rs
// ============================================================================
// Module: Descriptor Model Tests
// Description: Coverage for type tags, alias names, fallbacks, and registries.
// Purpose: Keep the registry-facing descriptor model stable.
// Dependencies: rpc-schema-core, proptest, serde_json
// ============================================================================

//! Descriptor model tests for type tag parsing, alias handling, fallback
//! serialization, and lazy registry entries.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based helpers for clarity."
)]

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use proptest::prelude::*;
use rpc_schema_core::ArgumentDescriptor;
use rpc_schema_core::ArgumentFallback;
use rpc_schema_core::ArgumentNames;
use rpc_schema_core::ArgumentType;
use rpc_schema_core::ArgumentTypeError;
use rpc_schema_core::CommandDescriptor;
use rpc_schema_core::CommandEntry;
use rpc_schema_core::CommandRegistry;
use rpc_schema_core::RegisteredCommand;
use serde_json::json;

// ============================================================================
// SECTION: Type Tags
// ============================================================================

#[test]
fn every_type_tag_parses_back_to_itself() {
    for arg_type in ArgumentType::all() {
        let parsed: ArgumentType = arg_type.as_str().parse().unwrap();
        assert_eq!(parsed, *arg_type);
    }
}

#[test]
fn unknown_type_tag_is_rejected() {
    let err = "STR_HEX".parse::<ArgumentType>().unwrap_err();
    assert_eq!(err, ArgumentTypeError::Unknown("STR_HEX".to_string()));

    let err = serde_json::from_value::<ArgumentType>(json!("string")).unwrap_err();
    assert!(err.to_string().contains("unknown argument type tag: string"));
}

#[test]
fn only_composite_tags_accept_children() {
    let composite: Vec<ArgumentType> =
        ArgumentType::all().iter().copied().filter(|tag| tag.is_composite()).collect();
    assert_eq!(
        composite,
        vec![
            ArgumentType::Array,
            ArgumentType::Object,
            ArgumentType::ObjectNamedParams,
            ArgumentType::ObjectUserKeys,
        ]
    );
}

// ============================================================================
// SECTION: Alias Names
// ============================================================================

#[test]
fn pipe_separated_names_keep_declaration_order() {
    let names = ArgumentNames::parse("conf_target|estimate_target");
    assert_eq!(names.as_slice(), ["conf_target", "estimate_target"]);
    assert_eq!(names.primary(), Some("conf_target"));
    assert_eq!(String::from(names), "conf_target|estimate_target");
}

#[test]
fn empty_declaration_yields_one_empty_alias() {
    let names = ArgumentNames::parse("");
    assert_eq!(names.as_slice(), [""]);
    assert!(!names.is_empty());
    assert!(ArgumentNames::from_aliases(Vec::<String>::new()).is_empty());
}

proptest! {
    #[test]
    fn parse_splits_on_every_separator(aliases in prop::collection::vec("[a-z_]{1,8}", 1..5)) {
        let declared = aliases.join("|");
        let names = ArgumentNames::parse(&declared);
        prop_assert_eq!(names.as_slice(), aliases.as_slice());
    }
}

// ============================================================================
// SECTION: Fallback Policy
// ============================================================================

#[test]
fn only_explicit_no_default_is_required() {
    let required = ArgumentDescriptor::new("amount", ArgumentType::Amount).required();
    let omitted = ArgumentDescriptor::new("comment", ArgumentType::String);
    let defaulted =
        ArgumentDescriptor::new("verbose", ArgumentType::Boolean).with_default(json!(false));
    assert!(required.is_required());
    assert!(!omitted.is_required());
    assert!(!defaulted.is_required());
}

#[test]
fn fallback_policies_deserialize_from_snapshot_form() {
    let required: ArgumentFallback =
        serde_json::from_value(json!({ "policy": "required" })).unwrap();
    let defaulted: ArgumentFallback =
        serde_json::from_value(json!({ "policy": "default", "value": 6 })).unwrap();
    assert_eq!(required, ArgumentFallback::Required);
    assert_eq!(defaulted, ArgumentFallback::Default(json!(6)));
}

#[test]
fn argument_fields_default_when_absent() {
    let argument: ArgumentDescriptor =
        serde_json::from_value(json!({ "names": "blockhash", "type": "STRING_HEX" })).unwrap();
    assert_eq!(argument.names.as_slice(), ["blockhash"]);
    assert_eq!(argument.arg_type, ArgumentType::StringHex);
    assert!(argument.description.is_empty());
    assert_eq!(argument.fallback, ArgumentFallback::Omitted);
    assert!(argument.children.is_empty());
}

#[test]
fn misspelled_descriptor_keys_are_rejected() {
    let argument = serde_json::from_value::<ArgumentDescriptor>(json!({
        "names": "amount", "type": "AMOUNT", "fallbak": { "policy": "required" }
    }));
    assert!(argument.unwrap_err().to_string().contains("fallbak"));

    let fallback = serde_json::from_value::<ArgumentFallback>(
        json!({ "policy": "default", "value": 1, "vaule": 2 }),
    );
    assert!(fallback.is_err());

    let command = serde_json::from_value::<CommandDescriptor>(json!({
        "name": "foo", "argumnets": []
    }));
    assert!(command.unwrap_err().to_string().contains("argumnets"));
}

// ============================================================================
// SECTION: Registry
// ============================================================================

#[test]
fn registry_entries_describe_lazily() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let entry = RegisteredCommand::new("blockchain", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        CommandDescriptor::new("getblockcount")
    });

    let mut registry = CommandRegistry::new();
    registry.register("getblockcount", entry);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let group = registry.groups().get("getblockcount").unwrap();
    assert_eq!(group.len(), 1);
    assert_eq!(group[0].category(), "blockchain");
    assert_eq!(group[0].describe().name, "getblockcount");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn registry_groups_by_name_in_name_order() {
    let mut registry = CommandRegistry::new();
    registry.register_descriptor("wallet", CommandDescriptor::new("sendtoaddress"));
    registry.register_descriptor("blockchain", CommandDescriptor::new("getblock"));
    registry.register_descriptor("blockchain", CommandDescriptor::new("getblock"));

    let names: Vec<&str> = registry.groups().keys().map(String::as_str).collect();
    assert_eq!(names, ["getblock", "sendtoaddress"]);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.groups()["getblock"].len(), 2);
}
