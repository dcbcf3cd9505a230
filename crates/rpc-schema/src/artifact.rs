// crates/rpc-schema/src/artifact.rs
// ============================================================================
// Module: Schema Artifact Builder
// Description: Renders, writes, and verifies the schema document on disk.
// Purpose: Produce a deterministic artifact and detect drift against it.
// Dependencies: cap-std, rpc-schema-config, serde_jcs, serde_json
// ============================================================================

//! ## Overview
//! [`SchemaBuilder`] wraps the registry walker with artifact handling. The
//! document is rendered as canonical JSON (RFC 8785 key order) re-indented for
//! review, so an unchanged registry always yields identical bytes.
//!
//! Writes go through capability handles: every directory component is opened
//! without following symlinks and the artifact is replaced with an atomic
//! rename of a temporary sibling. Verification re-renders the document and
//! compares it byte for byte with the file on disk.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use cap_primitives::fs::FollowSymlinks;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use cap_std::fs::OpenOptions;
use rpc_schema_config::DEFAULT_FILE_NAME;
use rpc_schema_core::CommandEntry;
use rpc_schema_core::RegistryGroups;
use serde_json::Value;

use crate::SchemaError;
use crate::audit::NoopAuditSink;
use crate::audit::SchemaAuditEvent;
use crate::audit::SchemaAuditSink;
use crate::walker::api_schema;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Temporary names tried before an atomic write gives up.
const TEMP_NAME_ATTEMPTS: u32 = 64;

/// OS error codes for a no-follow open that hit a symlink (Linux `ELOOP`).
#[cfg(target_os = "linux")]
const SYMLINK_REFUSED_CODES: &[i32] = &[40];
/// OS error codes for a no-follow open that hit a symlink (BSD and macOS `ELOOP`).
#[cfg(all(unix, not(target_os = "linux")))]
const SYMLINK_REFUSED_CODES: &[i32] = &[62];
/// OS error codes for a no-follow open that hit a symlink
/// (`ERROR_STOPPED_ON_SYMLINK`, `ERROR_CANT_ACCESS_FILE`).
#[cfg(windows)]
const SYMLINK_REFUSED_CODES: &[i32] = &[681, 1920];
/// No platform codes are known for a refused symlink.
#[cfg(not(any(unix, windows)))]
const SYMLINK_REFUSED_CODES: &[i32] = &[];

// ============================================================================
// SECTION: Artifact
// ============================================================================

/// Rendered schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaArtifact {
    /// Schema document tree.
    pub document: Value,
    /// Canonical pretty-printed bytes, newline terminated.
    pub bytes: Vec<u8>,
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for the schema artifact.
///
/// # Invariants
/// - The output directory is a trusted root; the file name must be a single path component.
/// - Each stage of an operation records one audit event.
#[derive(Clone)]
pub struct SchemaBuilder {
    /// Artifact file name inside the output directory.
    file_name: String,
    /// Audit sink for generation events.
    audit: Arc<dyn SchemaAuditSink>,
}

impl SchemaBuilder {
    /// Creates a builder with the default file name and no audit output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Overrides the artifact file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Routes audit events to the provided sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn SchemaAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Builds the schema artifact without touching disk.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the registry violates a structural rule or
    /// the document cannot be serialized.
    pub fn build<E: CommandEntry>(
        &self,
        groups: &RegistryGroups<E>,
    ) -> Result<SchemaArtifact, SchemaError> {
        let artifact = render_artifact(groups);
        match &artifact {
            Ok(artifact) => self.audit.record(
                &SchemaAuditEvent::ok("schema_generated", groups.len())
                    .with_bytes(artifact.bytes.len()),
            ),
            Err(err) => self.audit.record(&SchemaAuditEvent::failed(groups.len(), err.to_string())),
        }
        artifact
    }

    /// Builds the artifact and writes it into `output_dir`.
    ///
    /// Missing directories are created. An existing artifact is replaced
    /// atomically.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when generation fails or the output path is
    /// invalid, unsafe, or unwritable.
    pub fn write_to<E: CommandEntry>(
        &self,
        output_dir: &Path,
        groups: &RegistryGroups<E>,
    ) -> Result<SchemaArtifact, SchemaError> {
        let artifact = self.build(groups)?;
        let target = output_dir.join(&self.file_name);
        let written = artifact_file_name(&self.file_name)
            .and_then(|name| OutputDir::open(output_dir, true)?.replace(&name, &artifact.bytes));
        self.record_outcome("schema_written", groups.len(), &artifact, &target, &written);
        written.map(|()| artifact)
    }

    /// Verifies the artifact in `output_dir` matches the registry.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Mismatch`] when the file differs from the
    /// generated bytes and [`SchemaError::OutputPath`] when it is missing.
    pub fn verify_output<E: CommandEntry>(
        &self,
        output_dir: &Path,
        groups: &RegistryGroups<E>,
    ) -> Result<(), SchemaError> {
        let artifact = self.build(groups)?;
        let target = output_dir.join(&self.file_name);
        let verified = artifact_file_name(&self.file_name).and_then(|name| {
            let output = OutputDir::open(output_dir, false)?;
            let bytes = output.read_sized(&name, artifact.bytes.len())?;
            if bytes == artifact.bytes {
                Ok(())
            } else {
                Err(SchemaError::Mismatch(target.display().to_string()))
            }
        });
        self.record_outcome("schema_verified", groups.len(), &artifact, &target, &verified);
        verified
    }

    /// Records the audit event for a file operation.
    fn record_outcome(
        &self,
        event: &'static str,
        command_count: usize,
        artifact: &SchemaArtifact,
        target: &Path,
        outcome: &Result<(), SchemaError>,
    ) {
        let record = match outcome {
            Ok(()) => SchemaAuditEvent::ok(event, command_count),
            Err(err) => SchemaAuditEvent::failed(command_count, err.to_string()),
        };
        self.audit.record(&record.with_bytes(artifact.bytes.len()).with_path(target));
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaBuilder").field("file_name", &self.file_name).finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Walks the registry and renders canonical bytes.
fn render_artifact<E: CommandEntry>(
    groups: &RegistryGroups<E>,
) -> Result<SchemaArtifact, SchemaError> {
    let document = api_schema(groups)?;
    let bytes = serialize_json_pretty(&document)?;
    Ok(SchemaArtifact {
        document,
        bytes,
    })
}

/// Serializes a value into pretty JSON bytes with canonical key ordering.
fn serialize_json_pretty(value: &Value) -> Result<Vec<u8>, SchemaError> {
    let canonical =
        serde_jcs::to_vec(value).map_err(|err| SchemaError::Serialization(err.to_string()))?;
    let canonical_value: Value = serde_json::from_slice(&canonical)
        .map_err(|err| SchemaError::Serialization(err.to_string()))?;
    let mut bytes = serde_json::to_vec_pretty(&canonical_value)
        .map_err(|err| SchemaError::Serialization(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

// ============================================================================
// SECTION: Filesystem
// ============================================================================

/// Checks that the artifact file name is one normal path component.
fn artifact_file_name(file_name: &str) -> Result<PathBuf, SchemaError> {
    let name = PathBuf::from(file_name);
    let mut components = name.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(name),
        _ => Err(SchemaError::OutputPath(name)),
    }
}

/// Output directory reached one component at a time without following symlinks.
struct OutputDir {
    /// Handle on the innermost directory.
    dir: Dir,
    /// Directory path as given by the caller, for error reporting.
    shown: PathBuf,
}

impl OutputDir {
    /// Opens `path`, creating missing directories when `create` is set.
    fn open(path: &Path, create: bool) -> Result<Self, SchemaError> {
        let absolute =
            std::path::absolute(path).map_err(|_| SchemaError::OutputPath(path.to_path_buf()))?;
        let mut root = PathBuf::new();
        let mut names = Vec::new();
        for component in absolute.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => root.push(component),
                Component::Normal(name) => names.push(name),
                Component::CurDir => {}
                Component::ParentDir => return Err(SchemaError::OutputPath(path.to_path_buf())),
            }
        }
        if names.is_empty() {
            return Err(SchemaError::OutputPath(path.to_path_buf()));
        }
        let mut dir = Dir::open_ambient_dir(&root, ambient_authority())
            .map_err(|err| SchemaError::Io(err.to_string()))?;
        for name in names {
            dir = descend(&dir, Path::new(name), create)
                .map_err(|err| classify_open_error(&err, path))?;
        }
        Ok(Self {
            dir,
            shown: path.to_path_buf(),
        })
    }

    /// Replaces `name` with `bytes` through a temporary sibling and a rename.
    fn replace(&self, name: &Path, bytes: &[u8]) -> Result<(), SchemaError> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        options._cap_fs_ext_follow(FollowSymlinks::No);
        for attempt in 0 .. TEMP_NAME_ATTEMPTS {
            let temp = temp_sibling(name, attempt);
            let mut file = match self.dir.open_with(&temp, &options) {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(classify_open_error(&err, &self.shown.join(name))),
            };
            let stored = file
                .write_all(bytes)
                .and_then(|()| file.sync_all())
                .and_then(|()| self.dir.rename(&temp, &self.dir, name));
            if let Err(err) = stored {
                let _ = self.dir.remove_file(&temp);
                return Err(SchemaError::Io(err.to_string()));
            }
            return Ok(());
        }
        Err(SchemaError::Io(format!("no free temporary name for {}", name.display())))
    }

    /// Reads `name`, reporting a mismatch when its size is not `expected_len`.
    fn read_sized(&self, name: &Path, expected_len: usize) -> Result<Vec<u8>, SchemaError> {
        let target = self.shown.join(name);
        let mut options = OpenOptions::new();
        options.read(true);
        options._cap_fs_ext_follow(FollowSymlinks::No);
        let mut file =
            self.dir.open_with(name, &options).map_err(|err| classify_open_error(&err, &target))?;
        let metadata = file.metadata().map_err(|err| SchemaError::Io(err.to_string()))?;
        if !metadata.is_file() {
            return Err(SchemaError::OutputPath(target));
        }
        if u64::try_from(expected_len).ok() != Some(metadata.len()) {
            return Err(SchemaError::Mismatch(format!("size differs: {}", target.display())));
        }
        let mut bytes = Vec::with_capacity(expected_len);
        file.read_to_end(&mut bytes).map_err(|err| SchemaError::Io(err.to_string()))?;
        Ok(bytes)
    }
}

/// Opens child directory `name` without following symlinks, creating it when allowed.
fn descend(parent: &Dir, name: &Path, create: bool) -> io::Result<Dir> {
    let mut options = OpenOptions::new();
    options.read(true);
    options._cap_fs_ext_follow(FollowSymlinks::No);
    let file = match parent.open_with(name, &options) {
        Err(err) if create && err.kind() == ErrorKind::NotFound => {
            parent.create_dir(name)?;
            parent.open_with(name, &options)?
        }
        opened => opened?,
    };
    if !file.metadata()?.is_dir() {
        return Err(io::Error::new(ErrorKind::NotADirectory, "output path component is a file"));
    }
    Ok(Dir::from_std_file(file.into_std()))
}

/// Temporary sibling name for an atomic write of `name`.
fn temp_sibling(name: &Path, attempt: u32) -> PathBuf {
    let mut temp = OsString::from(".");
    temp.push(name);
    temp.push(format!(".{}-{attempt}.tmp", std::process::id()));
    PathBuf::from(temp)
}

/// Maps an open failure to [`SchemaError::OutputPath`] when the path itself is unusable.
fn classify_open_error(err: &io::Error, path: &Path) -> SchemaError {
    let unusable = matches!(
        err.kind(),
        ErrorKind::NotFound
            | ErrorKind::InvalidInput
            | ErrorKind::PermissionDenied
            | ErrorKind::NotADirectory
            | ErrorKind::Unsupported
    ) || err.raw_os_error().is_some_and(|code| SYMLINK_REFUSED_CODES.contains(&code));
    if unusable {
        SchemaError::OutputPath(path.to_path_buf())
    } else {
        SchemaError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests;
