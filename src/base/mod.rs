//! Foundation types for the typegraph toolchain.
//!
//! This module provides fundamental types used throughout the pipeline:
//! - [`SourceLocation`] - File/line/column positions attached to declarations and diagnostics
//! - [`naming`] - GraphQL identifier grammar and case conversion helpers
//!
//! This module has NO dependencies on other typegraph modules.

pub mod naming;
mod position;

pub use naming::{is_reserved_name, is_valid_name, to_constant_case, to_pascal_case};
pub use position::SourceLocation;
