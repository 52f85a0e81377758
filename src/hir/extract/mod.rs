//! Type extraction: exported declarations to the semantic model.
//!
//! # Module structure
//!
//! - [`registry`] - classifies declarations and validates type names
//! - [`context`] - ExtractionContext shared by all extraction functions
//! - [`metadata`] - phantom-tag unwrapping, directives and default values
//! - [`extract_field`] - field extraction and type resolution
//! - [`extract_declaration`] - per-declaration extraction

mod context;
mod extract_declaration;
mod extract_field;
mod metadata;
mod registry;


use smol_str::SmolStr;
use tracing::debug;

use crate::checker::TypeChecker;
use crate::config::Config;
use crate::hir::diagnostics::DiagnosticCollector;
use crate::hir::types::{ExtractedTypes, ScalarDefinition};

pub(crate) use context::{ExtractionContext, FieldSite, Position};
pub use registry::{ROOT_TYPE_NAMES, RegistryEntry, RegistryKind, TypeRegistry};

/// Extract declared types, scalars and directives under the source root.
///
/// The returned registry is needed to resolve operation signatures against
/// the same declarations.
pub fn extract_types<C: TypeChecker + ?Sized>(
    checker: &C,
    config: &Config,
    diagnostics: &mut DiagnosticCollector,
) -> (ExtractedTypes, TypeRegistry) {
    let registry = TypeRegistry::build(checker, config, diagnostics);
    let mut extracted = ExtractedTypes {
        scalars: configured_scalars(config),
        ..ExtractedTypes::default()
    };

    let mut ctx = ExtractionContext::new(checker, config, &registry, diagnostics);
    for entry in registry.entries() {
        match entry.kind {
            RegistryKind::Scalar => extracted.scalars.push(ctx.extract_scalar(entry)),
            RegistryKind::Directive => extracted.directives.extend(ctx.extract_directive(entry)),
            _ => extracted.types.extend(ctx.extract_declared(entry)),
        }
    }

    extracted.types.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
    extracted.scalars.sort_by(|a, b| a.name.cmp(&b.name));
    extracted.directives.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(
        "[EXTRACT] {} types, {} scalars, {} directives",
        extracted.types.len(),
        extracted.scalars.len(),
        extracted.directives.len()
    );
    (extracted, registry)
}

/// One scalar definition per configured scalar name.
fn configured_scalars(config: &Config) -> Vec<ScalarDefinition> {
    let mut scalars: Vec<ScalarDefinition> = Vec::new();
    for mapping in &config.scalars {
        let name = SmolStr::new(&mapping.name);
        match scalars.iter_mut().find(|s| s.name == name) {
            Some(existing) => {
                if existing.only != mapping.only {
                    existing.only = None;
                }
                if existing.description.is_none() {
                    existing.description = mapping.description.clone();
                }
            }
            None => scalars.push(ScalarDefinition {
                name,
                only: mapping.only,
                description: mapping.description.clone(),
                location: None,
            }),
        }
    }
    scalars
}
