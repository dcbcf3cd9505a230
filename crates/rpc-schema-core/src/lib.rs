// crates/rpc-schema-core/src/lib.rs
// ============================================================================
// Module: RPC Schema Core Library
// Description: Public API surface for RPC command descriptors.
// Purpose: Expose the descriptor model, type tags, and registry interface.
// Dependencies: crate::{argument_type, descriptor, registry}
// ============================================================================

//! ## Overview
//! RPC schema core defines the read-only metadata a command registry hands to
//! the schema generator: command descriptors, argument descriptors with alias
//! names and fallback policies, the closed set of argument type tags, and the
//! entry interface used to resolve descriptors lazily.
//!
//! Nothing in this crate mutates registry data once it has been registered.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod argument_type;
pub mod descriptor;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use argument_type::ArgumentType;
pub use argument_type::ArgumentTypeError;
pub use descriptor::ArgumentDescriptor;
pub use descriptor::ArgumentFallback;
pub use descriptor::ArgumentNames;
pub use descriptor::CommandDescriptor;
pub use registry::CommandEntry;
pub use registry::CommandRegistry;
pub use registry::RegisteredCommand;
pub use registry::RegistryGroups;
