// crates/rpc-schema/src/audit.rs
// ============================================================================
// Module: Schema Audit Logging
// Description: Structured audit events for schema generation and artifacts.
// Purpose: Emit JSON-lines records without a hard logging dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events record what the artifact builder did: generation, writes,
//! verification, and failures. Sinks are intentionally small so callers can
//! route events to stderr, a file, or their own pipeline. Sink failures are
//! swallowed and never change generation results.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome label for audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// Operation completed.
    Ok,
    /// Operation failed.
    Error,
}

/// Schema audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Operation outcome.
    pub outcome: AuditOutcome,
    /// Number of command names in the registry.
    pub command_count: usize,
    /// Size of the rendered artifact in bytes, when rendered.
    pub artifact_bytes: Option<usize>,
    /// Artifact path, when the event concerns a file.
    pub path: Option<String>,
    /// Error message for failed operations.
    pub error: Option<String>,
}

impl SchemaAuditEvent {
    /// Creates a successful event stamped with the current time.
    #[must_use]
    pub fn ok(event: &'static str, command_count: usize) -> Self {
        Self {
            event,
            timestamp_ms: now_ms(),
            outcome: AuditOutcome::Ok,
            command_count,
            artifact_bytes: None,
            path: None,
            error: None,
        }
    }

    /// Creates a `schema_failed` event stamped with the current time.
    #[must_use]
    pub fn failed(command_count: usize, error: impl Into<String>) -> Self {
        Self {
            event: "schema_failed",
            timestamp_ms: now_ms(),
            outcome: AuditOutcome::Error,
            command_count,
            artifact_bytes: None,
            path: None,
            error: Some(error.into()),
        }
    }

    /// Attaches the artifact size.
    #[must_use]
    pub const fn with_bytes(mut self, artifact_bytes: usize) -> Self {
        self.artifact_bytes = Some(artifact_bytes);
        self
    }

    /// Attaches the artifact path.
    #[must_use]
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.display().to_string());
        self
    }
}

/// Milliseconds since the Unix epoch, or zero if the clock is before it.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for schema events.
pub trait SchemaAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &SchemaAuditEvent);
}

/// Audit sink that discards every event.
pub struct NoopAuditSink;

impl SchemaAuditSink for NoopAuditSink {
    fn record(&self, _event: &SchemaAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl SchemaAuditSink for StderrAuditSink {
    fn record(&self, event: &SchemaAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl SchemaAuditSink for FileAuditSink {
    fn record(&self, event: &SchemaAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}
