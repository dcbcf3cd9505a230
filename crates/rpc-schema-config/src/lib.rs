// crates/rpc-schema-config/src/lib.rs
// ============================================================================
// Module: RPC Schema Config Library
// Description: Configuration model and loader for the schema generator.
// Purpose: Single source of truth for rpc-schema.toml semantics.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! `rpc-schema-config` defines the `rpc-schema.toml` model: where the registry
//! snapshot lives, where the artifact is written, and whether audit events are
//! recorded. Loading is strict and fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
