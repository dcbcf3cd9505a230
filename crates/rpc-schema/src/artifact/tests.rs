// crates/rpc-schema/src/artifact/tests.rs
// ============================================================================
// Module: Schema Artifact Unit Tests
// Description: Coverage for rendering, atomic writes, and drift detection.
// Dependencies: rpc-schema-core, tempfile
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based helpers for clarity."
)]

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use rpc_schema_core::ArgumentDescriptor;
use rpc_schema_core::ArgumentType;
use rpc_schema_core::CommandDescriptor;
use rpc_schema_core::CommandRegistry;

use super::SYMLINK_REFUSED_CODES;
use super::SchemaBuilder;
use super::classify_open_error;
use crate::SchemaError;
use crate::audit::SchemaAuditEvent;
use crate::audit::SchemaAuditSink;

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<SchemaAuditEvent>>,
}

impl RecordingSink {
    fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|event| event.event).collect()
    }
}

impl SchemaAuditSink for RecordingSink {
    fn record(&self, event: &SchemaAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn sample_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register_descriptor(
        "wallet",
        CommandDescriptor::new("walletpassphrase")
            .with_argument(
                ArgumentDescriptor::new("passphrase", ArgumentType::String).required(),
            )
            .with_argument(ArgumentDescriptor::new("timeout", ArgumentType::Number).required()),
    );
    registry.register_descriptor("control", CommandDescriptor::new("uptime"));
    registry
}

#[test]
fn build_renders_pretty_canonical_bytes() {
    let artifact = SchemaBuilder::new().build(sample_registry().groups()).unwrap();
    let text = String::from_utf8(artifact.bytes.clone()).unwrap();
    assert!(text.ends_with("}\n"));
    assert!(text.starts_with("{\n  \"commands\""));
    let reparsed: serde_json::Value = serde_json::from_slice(&artifact.bytes).unwrap();
    assert_eq!(reparsed, artifact.document);
}

#[test]
fn write_then_verify_round_trips() {
    let temp = tempfile::tempdir().expect("tempdir");
    let out = temp.path().join("nested/out");
    let registry = sample_registry();
    let builder = SchemaBuilder::new();

    let artifact = builder.write_to(&out, registry.groups()).unwrap();
    assert_eq!(fs::read(out.join("rpc-schema.json")).unwrap(), artifact.bytes);
    builder.verify_output(&out, registry.groups()).unwrap();

    let leftovers: Vec<_> = fs::read_dir(&out).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn verify_detects_drift() {
    let temp = tempfile::tempdir().expect("tempdir");
    let builder = SchemaBuilder::new().with_file_name("api.json");
    let registry = sample_registry();
    builder.write_to(temp.path(), registry.groups()).unwrap();

    let path = temp.path().join("api.json");
    let tampered = fs::read_to_string(&path).unwrap().replace("uptime", "uptimx");
    fs::write(&path, tampered).unwrap();
    let err = builder.verify_output(temp.path(), registry.groups()).unwrap_err();
    assert!(matches!(err, SchemaError::Mismatch(_)));

    fs::write(&path, b"{}\n").unwrap();
    let err = builder.verify_output(temp.path(), registry.groups()).unwrap_err();
    assert!(matches!(err, SchemaError::Mismatch(_)));
}

#[test]
fn verify_reports_missing_artifact() {
    let temp = tempfile::tempdir().expect("tempdir");
    let err = SchemaBuilder::new().verify_output(temp.path(), sample_registry().groups());
    assert!(matches!(err, Err(SchemaError::OutputPath(_))));
}

#[test]
fn file_names_must_be_single_components() {
    let temp = tempfile::tempdir().expect("tempdir");
    let registry = sample_registry();
    for name in ["../escape.json", "nested/api.json", ""] {
        let err = SchemaBuilder::new()
            .with_file_name(name)
            .write_to(temp.path(), registry.groups())
            .unwrap_err();
        assert!(matches!(err, SchemaError::OutputPath(_)), "{name}");
    }
}

#[test]
fn parent_traversal_in_output_dir_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let out = temp.path().join("a/../b");
    let err = SchemaBuilder::new().write_to(&out, sample_registry().groups()).unwrap_err();
    assert!(matches!(err, SchemaError::OutputPath(_)));
}

#[cfg(unix)]
#[test]
fn symlinked_output_dirs_are_refused() {
    let temp = tempfile::tempdir().expect("tempdir");
    let real = temp.path().join("real");
    fs::create_dir(&real).unwrap();
    let link = temp.path().join("link");
    std::os::unix::fs::symlink(&real, &link).unwrap();
    let err = SchemaBuilder::new().write_to(&link, sample_registry().groups()).unwrap_err();
    assert!(matches!(err, SchemaError::OutputPath(_)));
    assert!(fs::read_dir(&real).unwrap().next().is_none());
}

#[test]
fn audit_events_follow_each_stage() {
    let temp = tempfile::tempdir().expect("tempdir");
    let sink = Arc::new(RecordingSink::default());
    let builder = SchemaBuilder::new().with_audit_sink(sink.clone());
    let registry = sample_registry();

    builder.write_to(temp.path(), registry.groups()).unwrap();
    builder.verify_output(temp.path(), registry.groups()).unwrap();
    assert_eq!(
        sink.names(),
        ["schema_generated", "schema_written", "schema_generated", "schema_verified"]
    );

    let mut broken = CommandRegistry::new();
    broken.register_descriptor("wallet", CommandDescriptor::new("dup"));
    broken.register_descriptor("wallet", CommandDescriptor::new("dup"));
    assert!(builder.build(broken.groups()).is_err());
    let events = sink.events.lock().unwrap();
    let last = events.last().unwrap();
    assert_eq!(last.event, "schema_failed");
    assert!(last.error.as_deref().unwrap().contains("dup"));
}

#[test]
fn default_file_name_follows_config_default() {
    let temp = tempfile::tempdir().expect("tempdir");
    SchemaBuilder::default().write_to(temp.path(), sample_registry().groups()).unwrap();
    assert!(temp.path().join(rpc_schema_config::DEFAULT_FILE_NAME).is_file());
}

#[test]
fn refused_symlink_codes_are_path_errors() {
    for code in SYMLINK_REFUSED_CODES {
        let err = io::Error::from_raw_os_error(*code);
        let mapped = classify_open_error(&err, Path::new("out"));
        assert!(matches!(mapped, SchemaError::OutputPath(_)), "code {code}");
    }
    let mapped = classify_open_error(&io::Error::other("disk full"), Path::new("out"));
    assert!(matches!(mapped, SchemaError::Io(_)));
}
