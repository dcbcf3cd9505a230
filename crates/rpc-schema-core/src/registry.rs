// crates/rpc-schema-core/src/registry.rs
// ============================================================================
// Module: Command Registry
// Description: Registry entries that resolve command descriptors on demand.
// Purpose: Define the registry boundary consumed by schema generation.
// Dependencies: crate::descriptor
// ============================================================================

//! ## Overview
//! A registry groups entries by command name. Each entry knows its category
//! and can produce its [`CommandDescriptor`] when asked; descriptors are not
//! kept in memory for every command, so producers run lazily.
//!
//! Registries are built once and then only borrowed. A name is expected to
//! map to exactly one entry; the generator rejects any other count.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::CommandDescriptor;

// ============================================================================
// SECTION: Entry Interface
// ============================================================================

/// Registered entries grouped by command name, in name order.
pub type RegistryGroups<E> = BTreeMap<String, Vec<E>>;

/// Registry entry capable of producing a command descriptor.
pub trait CommandEntry {
    /// Returns the command category.
    fn category(&self) -> &str;

    /// Produces the command descriptor.
    fn describe(&self) -> CommandDescriptor;
}

impl<T: CommandEntry + ?Sized> CommandEntry for &T {
    fn category(&self) -> &str {
        (**self).category()
    }

    fn describe(&self) -> CommandDescriptor {
        (**self).describe()
    }
}

/// Descriptor producer stored by [`RegisteredCommand`].
type DescriptorProducer = dyn Fn() -> CommandDescriptor + Send + Sync;

/// Closure-backed registry entry.
///
/// # Invariants
/// - The producer is invoked only through [`CommandEntry::describe`].
#[derive(Clone)]
pub struct RegisteredCommand {
    /// Category the command is listed under.
    category: String,
    /// Lazily invoked descriptor producer.
    producer: Arc<DescriptorProducer>,
}

impl RegisteredCommand {
    /// Creates an entry from a category and a descriptor producer.
    #[must_use]
    pub fn new<F>(category: impl Into<String>, producer: F) -> Self
    where
        F: Fn() -> CommandDescriptor + Send + Sync + 'static,
    {
        Self {
            category: category.into(),
            producer: Arc::new(producer),
        }
    }

    /// Creates an entry that hands out clones of an already-built descriptor.
    #[must_use]
    pub fn from_descriptor(category: impl Into<String>, descriptor: CommandDescriptor) -> Self {
        Self::new(category, move || descriptor.clone())
    }
}

impl CommandEntry for RegisteredCommand {
    fn category(&self) -> &str {
        &self.category
    }

    fn describe(&self) -> CommandDescriptor {
        (self.producer)()
    }
}

impl fmt::Debug for RegisteredCommand {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegisteredCommand")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// In-memory command registry grouped by command name.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    /// Entries grouped by command name.
    groups: RegistryGroups<RegisteredCommand>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entry under a command name.
    ///
    /// Entries sharing a name accumulate in registration order; the generator
    /// decides whether that grouping is acceptable.
    pub fn register(&mut self, name: impl Into<String>, entry: RegisteredCommand) {
        self.groups.entry(name.into()).or_default().push(entry);
    }

    /// Registers an entry named after the descriptor it produces.
    pub fn register_descriptor(
        &mut self,
        category: impl Into<String>,
        descriptor: CommandDescriptor,
    ) {
        let name = descriptor.name.clone();
        self.register(name, RegisteredCommand::from_descriptor(category, descriptor));
    }

    /// Returns the entries grouped by command name.
    #[must_use]
    pub const fn groups(&self) -> &RegistryGroups<RegisteredCommand> {
        &self.groups
    }

    /// Returns the number of distinct command names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true when no command is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
