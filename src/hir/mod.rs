//! High-level IR (HIR): the semantic model of declared types and operations.
//!
//! Extraction turns what the type checker reports into a language-neutral
//! model. Nothing here knows about the schema language; the converter in
//! [`crate::schema`] consumes it.
//!
//! ## Key Types
//!
//! - [`DeclaredType`] - an object, interface, union or enum declaration
//! - [`SemanticType`] - a field type, with its own nullability
//! - [`OperationBinding`] - a query, mutation or field resolver
//! - [`DiagnosticCollector`] - errors and warnings shared by every stage
//!
//! ## Stages
//!
//! ```text
//! declarations(source_root)    ← INPUT: exported declarations
//!     │
//!     ▼
//! TypeRegistry::build          ← classify + name checks
//!     │
//!     ▼
//! extract_types                ← DeclaredType / ScalarDefinition / DirectiveDefinition
//!     │
//!     ▼
//! extract_operations           ← OperationBinding (both authoring conventions)
//! ```

mod diagnostics;
mod extract;
mod operations;
mod types;

pub use diagnostics::{Diagnostic, DiagnosticCollector, Diagnostics, RelatedInfo, Severity, codes};
pub use extract::{ROOT_TYPE_NAMES, RegistryEntry, RegistryKind, TypeRegistry, extract_types};
pub use operations::extract_operations;
pub use types::{
    AuthoringStyle, DeclarationKind, DeclaredType, Deprecation, DirectiveApplication,
    DirectiveDefinition, DirectiveLocation, EnumMember, ExtractedTypes, FieldDefinition,
    ImplementationRef, OperationBinding, OperationKind, PrimitiveKind, ScalarDefinition,
    SemanticKind, SemanticType, TypeMetadata, TypePayload,
};
