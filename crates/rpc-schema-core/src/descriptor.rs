// crates/rpc-schema-core/src/descriptor.rs
// ============================================================================
// Module: Command Descriptors
// Description: Read-only metadata records for RPC commands and arguments.
// Purpose: Describe command input trees for schema generation.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Descriptors describe a command and the tree of arguments it accepts. They
//! are plain data: structural rules (unique aliases, child counts per type)
//! are checked by the schema generator, which fails closed on violations, so
//! descriptors can be loaded verbatim from registry snapshots. Unknown keys
//! are rejected when deserializing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::argument_type::ArgumentType;

// ============================================================================
// SECTION: Alias Names
// ============================================================================

/// Separator between alias names in the declared form (`"a|b"`).
pub const ALIAS_SEPARATOR: &str = "|";

/// Alias names bound to a single argument.
///
/// # Invariants
/// - Declaration order is preserved.
/// - No validation happens here; empty lists and empty aliases are rejected by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ArgumentNames(Vec<String>);

impl ArgumentNames {
    /// Parses `|`-separated alias names.
    #[must_use]
    pub fn parse(declared: &str) -> Self {
        Self(declared.split(ALIAS_SEPARATOR).map(str::to_string).collect())
    }

    /// Builds alias names from an explicit list.
    #[must_use]
    pub fn from_aliases<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(aliases.into_iter().map(Into::into).collect())
    }

    /// Returns the aliases in declaration order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the first declared alias, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Returns true when no alias is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ArgumentNames {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for ArgumentNames {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ArgumentNames> for String {
    fn from(value: ArgumentNames) -> Self {
        value.0.join(ALIAS_SEPARATOR)
    }
}

// ============================================================================
// SECTION: Fallback Policy
// ============================================================================

/// How an argument behaves when the caller leaves it out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", content = "value", rename_all = "snake_case", deny_unknown_fields)]
pub enum ArgumentFallback {
    /// No default exists; the caller must supply the argument.
    Required,
    /// The argument may be left out and has no default value.
    #[default]
    Omitted,
    /// The argument may be left out and takes this default value.
    Default(Value),
}

// ============================================================================
// SECTION: Argument Descriptor
// ============================================================================

/// Descriptor for one argument node.
///
/// # Invariants
/// - `children` is only meaningful for composite [`ArgumentType`] tags.
/// - The descriptor is never mutated after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentDescriptor {
    /// Alias names for the argument.
    pub names: ArgumentNames,
    /// Argument type tag.
    #[serde(rename = "type")]
    pub arg_type: ArgumentType,
    /// Human-readable description; may be empty.
    #[serde(default)]
    pub description: String,
    /// Fallback policy applied when the argument is left out.
    #[serde(default)]
    pub fallback: ArgumentFallback,
    /// Nested arguments of a composite type, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ArgumentDescriptor>,
}

impl ArgumentDescriptor {
    /// Creates an optional argument with no description or children.
    #[must_use]
    pub fn new(names: impl Into<ArgumentNames>, arg_type: ArgumentType) -> Self {
        Self {
            names: names.into(),
            arg_type,
            description: String::new(),
            fallback: ArgumentFallback::Omitted,
            children: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the argument as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.fallback = ArgumentFallback::Required;
        self
    }

    /// Gives the argument a default value.
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.fallback = ArgumentFallback::Default(value);
        self
    }

    /// Sets the nested arguments.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Returns true when the fallback policy is explicitly "no default".
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self.fallback, ArgumentFallback::Required)
    }
}

// ============================================================================
// SECTION: Command Descriptor
// ============================================================================

/// Descriptor for one RPC command.
///
/// The command category belongs to the registry entry rather than the
/// descriptor; see [`crate::CommandEntry::category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDescriptor {
    /// Command name, unique within a registry.
    pub name: String,
    /// Human-readable description; may be empty.
    #[serde(default)]
    pub description: String,
    /// Usage examples in declaration order.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Top-level arguments in declaration order.
    #[serde(default)]
    pub arguments: Vec<ArgumentDescriptor>,
}

impl CommandDescriptor {
    /// Creates a command with no description, examples, or arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            examples: Vec::new(),
            arguments: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a usage example.
    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Appends a top-level argument.
    #[must_use]
    pub fn with_argument(mut self, argument: ArgumentDescriptor) -> Self {
        self.arguments.push(argument);
        self
    }
}
