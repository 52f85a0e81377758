//! # typegraph-base
//!
//! Core library for inferring a GraphQL schema and resolver bindings from
//! declared types and operation functions.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline  → generate(): every stage, halting on errors
//!   ↓
//! emit      → SDL text, JSON AST, resolver map
//!   ↓
//! integrate → roots, type extensions, pruning, resolver table
//!   ↓
//! validate  → interfaces, cycles, categories, directives
//!   ↓
//! schema    → semantic types → field types, inline naming
//!   ↓
//! hir       → type and operation extraction, diagnostics
//!   ↓
//! checker   → TypeChecker trait, in-memory checker
//!   ↓
//! config    → Config, scalar mappings
//!   ↓
//! base      → SourceLocation, identifier grammar, case conversion
//! ```

// ============================================================================
// MODULES (dependency order: base → config → checker → hir → schema → ...)
// ============================================================================

/// Foundation types: SourceLocation, naming helpers
pub mod base;

/// Configuration: roots, runtime module, custom scalars
pub mod config;

/// Type-resolution service interface and in-memory implementation
pub mod checker;

/// Runtime module vocabulary: brands, wrappers, operation markers, hidden keys
pub mod runtime;

/// High-level IR: semantic model, extraction, diagnostics
pub mod hir;

/// Schema model and conversion
pub mod schema;

/// Structural validation
pub mod validate;

/// Integration of base types and operation extensions
pub mod integrate;

/// SDL, AST and resolver map output
pub mod emit;

/// End-to-end generation
pub mod pipeline;

// Re-export the entry points
pub use checker::{MemoryChecker, TypeChecker};
pub use config::{Config, ConfigError};
pub use hir::{Diagnostic, Diagnostics, Severity, codes};
pub use pipeline::{GenerateOutput, GenerateResult, generate};
