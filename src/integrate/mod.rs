//! Integration: base types and operation extensions become one document.
//!
//! ```text
//! ConvertedSchema
//!     │
//!     ├── synthesize Query / Mutation   (only when an operation targets them)
//!     ├── group operation fields        → TypeExtension per target
//!     ├── resolver table                → ResolverMap
//!     └── prune (optional)              → drop types unreachable from the roots
//! ```

mod document;
mod prune;


pub use document::{ResolverMap, SchemaDocument, TypeExtension};

use std::collections::BTreeMap;

use smol_str::SmolStr;
use tracing::{debug, info};

use crate::hir::{Diagnostic, DiagnosticCollector, OperationKind, codes};
use crate::schema::{ConvertedSchema, OperationField, TypeBody, TypeDefinition};

/// Merge operation fields into the converted schema.
///
/// Bindings whose target is unknown or cannot be extended are reported and
/// left out of both the document and the resolver table.
pub fn integrate_schema(
    schema: ConvertedSchema,
    prune_unreachable: bool,
    diagnostics: &mut DiagnosticCollector,
) -> (SchemaDocument, ResolverMap) {
    let ConvertedSchema {
        mut types,
        directives,
        operations,
    } = schema;

    let has_query = operations.iter().any(|o| o.kind == OperationKind::Query);
    let has_mutation = operations.iter().any(|o| o.kind == OperationKind::Mutation);
    for (present, kind) in [
        (has_query, OperationKind::Query),
        (has_mutation, OperationKind::Mutation),
    ] {
        if let (true, Some(root)) = (present, kind.root_name()) {
            debug!("[INTEGRATE] synthesizing root '{}'", root);
            types.push(empty_root(root));
        }
    }
    types.sort_by(|a, b| a.name.cmp(&b.name));

    let mut grouped: BTreeMap<SmolStr, Vec<OperationField>> = BTreeMap::new();
    for operation in operations {
        grouped
            .entry(operation.target.clone())
            .or_default()
            .push(operation);
    }

    let mut extensions = Vec::new();
    let mut resolvers = ResolverMap::new();
    for (target, operations) in grouped {
        if let Some(extension) = extend(&types, &target, operations, &mut resolvers, diagnostics) {
            extensions.push(extension);
        }
    }

    let mut document = SchemaDocument {
        types,
        extensions,
        directives,
        has_query,
        has_mutation,
    };
    if prune_unreachable {
        prune::prune_unreachable(&mut document, &mut resolvers);
    }

    info!(
        "[INTEGRATE] {} types, {} extensions, {} resolvers",
        document.types.len(),
        document.extensions.len(),
        resolvers.len()
    );
    (document, resolvers)
}

fn empty_root(name: &str) -> TypeDefinition {
    TypeDefinition {
        name: name.into(),
        description: None,
        directives: Vec::new(),
        location: None,
        body: TypeBody::Object {
            fields: Vec::new(),
            interfaces: Vec::new(),
        },
    }
}

/// Build the extension for one target, registering each accepted field's
/// implementation.
fn extend(
    types: &[TypeDefinition],
    target: &SmolStr,
    operations: Vec<OperationField>,
    resolvers: &mut ResolverMap,
    diagnostics: &mut DiagnosticCollector,
) -> Option<TypeExtension> {
    let Some(base) = types.iter().find(|t| &t.name == target) else {
        for operation in &operations {
            diagnostics.error(
                codes::UNKNOWN_TARGET_TYPE,
                format!(
                    "Operation '{}' extends '{}', which is neither a declared type nor a root",
                    operation.field.name, target
                ),
                operation.field.location.clone(),
            );
        }
        return None;
    };
    if !base.is_extensible() {
        for operation in &operations {
            diagnostics.error(
                codes::INVALID_EXTENSION_TARGET,
                format!(
                    "Operation '{}' extends {} '{}'; only object and interface types can be extended",
                    operation.field.name,
                    base.kind_name(),
                    target
                ),
                operation.field.location.clone(),
            );
        }
        return None;
    }

    let mut fields = Vec::with_capacity(operations.len());
    for operation in operations {
        if let Some(existing) = base.fields().iter().find(|f| f.name == operation.field.name) {
            let mut diagnostic = Diagnostic::error(
                codes::DUPLICATE_FIELD_DEFINITION,
                format!(
                    "Operation '{}' redeclares field '{}.{}'",
                    operation.implementation, target, operation.field.name
                ),
            )
            .at(operation.field.location.clone());
            if let Some(location) = &existing.location {
                diagnostic = diagnostic.with_related(location.clone(), "field declared here");
            }
            diagnostics.add(diagnostic);
            continue;
        }
        resolvers.insert(
            target.clone(),
            operation.field.name.clone(),
            operation.implementation,
        );
        fields.push(operation.field);
    }
    if fields.is_empty() {
        return None;
    }
    fields.sort_by(|a, b| a.name.cmp(&b.name));
    Some(TypeExtension {
        target: target.clone(),
        fields,
    })
}
