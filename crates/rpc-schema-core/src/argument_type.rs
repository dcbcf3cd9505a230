// crates/rpc-schema-core/src/argument_type.rs
// ============================================================================
// Module: Argument Type Tags
// Description: Closed set of RPC argument type tags.
// Purpose: Give every argument a typed, exhaustively matchable kind.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Argument type tags are a closed set. They serialize as their upper-case
//! registry names (`STRING_HEX`, `OBJECT_USER_KEYS`, ...) and parsing any other
//! string fails with [`ArgumentTypeError::Unknown`]; there is no fallback tag.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when parsing argument type tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentTypeError {
    /// The tag is not part of the closed argument type set.
    #[error("unknown argument type tag: {0}")]
    Unknown(String),
}

// ============================================================================
// SECTION: Argument Types
// ============================================================================

/// Argument type tag for an RPC argument.
///
/// # Invariants
/// - The set is closed; consumers match it exhaustively.
/// - Composite tags ([`Self::Array`], [`Self::Object`], [`Self::ObjectNamedParams`],
///   [`Self::ObjectUserKeys`]) are the only tags that may carry children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ArgumentType {
    /// Monetary amount, given as a number or a decimal string.
    Amount,
    /// Positional array whose items are described by the children.
    Array,
    /// Boolean flag.
    Boolean,
    /// Plain number.
    Number,
    /// Object with a fixed set of named members.
    Object,
    /// Object whose members are passed as named parameters.
    ObjectNamedParams,
    /// Object with caller-chosen keys sharing one value schema.
    ObjectUserKeys,
    /// Single number or a `[begin, end]` pair.
    Range,
    /// Free-form string.
    String,
    /// Hex-encoded string.
    StringHex,
}

impl ArgumentType {
    /// Returns the canonical tag for the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "AMOUNT",
            Self::Array => "ARRAY",
            Self::Boolean => "BOOLEAN",
            Self::Number => "NUMBER",
            Self::Object => "OBJECT",
            Self::ObjectNamedParams => "OBJECT_NAMED_PARAMS",
            Self::ObjectUserKeys => "OBJECT_USER_KEYS",
            Self::Range => "RANGE",
            Self::String => "STRING",
            Self::StringHex => "STRING_HEX",
        }
    }

    /// Returns every argument type in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Amount,
            Self::Array,
            Self::Boolean,
            Self::Number,
            Self::Object,
            Self::ObjectNamedParams,
            Self::ObjectUserKeys,
            Self::Range,
            Self::String,
            Self::StringHex,
        ]
    }

    /// Returns true when arguments of this type may carry children.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Array | Self::Object | Self::ObjectNamedParams | Self::ObjectUserKeys)
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ArgumentType {
    type Err = ArgumentTypeError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "AMOUNT" => Ok(Self::Amount),
            "ARRAY" => Ok(Self::Array),
            "BOOLEAN" => Ok(Self::Boolean),
            "NUMBER" => Ok(Self::Number),
            "OBJECT" => Ok(Self::Object),
            "OBJECT_NAMED_PARAMS" => Ok(Self::ObjectNamedParams),
            "OBJECT_USER_KEYS" => Ok(Self::ObjectUserKeys),
            "RANGE" => Ok(Self::Range),
            "STRING" => Ok(Self::String),
            "STRING_HEX" => Ok(Self::StringHex),
            other => Err(ArgumentTypeError::Unknown(other.to_string())),
        }
    }
}

impl TryFrom<String> for ArgumentType {
    type Error = ArgumentTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ArgumentType> for String {
    fn from(value: ArgumentType) -> Self {
        value.as_str().to_string()
    }
}
