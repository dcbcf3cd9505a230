// crates/rpc-schema/src/walker/tests.rs
// ============================================================================
// Module: Registry Walker Unit Tests
// Description: Coverage for grouping, ordering, and registration checks.
// Dependencies: rpc-schema-core, serde_json
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based helpers for clarity."
)]

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use rpc_schema_core::CommandDescriptor;
use rpc_schema_core::CommandRegistry;
use rpc_schema_core::RegisteredCommand;
use rpc_schema_core::RegistryGroups;
use serde_json::json;

use super::api_schema;
use crate::SchemaError;

#[test]
fn commands_are_keyed_by_name_in_registry_order() {
    let mut registry = CommandRegistry::new();
    registry.register_descriptor("wallet", CommandDescriptor::new("walletlock"));
    registry.register_descriptor("blockchain", CommandDescriptor::new("getbestblockhash"));

    let document = api_schema(registry.groups()).unwrap();
    let names: Vec<&String> = document["commands"].as_object().unwrap().keys().collect();
    assert_eq!(names, ["getbestblockhash", "walletlock"]);
    assert_eq!(document["commands"]["walletlock"][0]["category"], json!("wallet"));
    assert_eq!(document["commands"]["walletlock"].as_array().unwrap().len(), 1);
}

#[test]
fn empty_registry_yields_empty_commands() {
    let document = api_schema(CommandRegistry::new().groups()).unwrap();
    assert_eq!(document, json!({ "commands": {} }));
}

#[test]
fn multiple_entries_for_one_name_are_rejected() {
    let mut registry = CommandRegistry::new();
    registry.register_descriptor("wallet", CommandDescriptor::new("getbalance"));
    registry.register_descriptor("wallet", CommandDescriptor::new("getbalance"));
    let err = api_schema(registry.groups()).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::AmbiguousRegistration { ref command, count: 2 } if command == "getbalance"
    ));
}

#[test]
fn empty_groups_are_rejected() {
    let mut groups: RegistryGroups<RegisteredCommand> = RegistryGroups::new();
    groups.insert("ping".to_string(), Vec::new());
    let err = api_schema(&groups).unwrap_err();
    assert!(matches!(err, SchemaError::EmptyRegistration { ref command } if command == "ping"));
}

#[test]
fn descriptors_are_resolved_once_per_walk() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut registry = CommandRegistry::new();
    registry.register(
        "ping",
        RegisteredCommand::new("control", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            CommandDescriptor::new("ping")
        }),
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    api_schema(registry.groups()).unwrap();
    api_schema(registry.groups()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn borrowed_entries_are_accepted() {
    let entry = RegisteredCommand::from_descriptor("control", CommandDescriptor::new("stop"));
    let mut groups: RegistryGroups<&RegisteredCommand> = RegistryGroups::new();
    groups.insert("stop".to_string(), vec![&entry]);
    let document = api_schema(&groups).unwrap();
    assert_eq!(document["commands"]["stop"][0]["name"], json!("stop"));
}
