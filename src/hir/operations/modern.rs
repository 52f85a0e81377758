//! Operation-defining functions.
//!
//! ```text
//! export const users = defineQuery<Args, User[]>(...)          → QueryResolver<Args, User[]>
//! export const createUser = defineMutation<Args, User>(...)    → MutationResolver<Args, User>
//! export const posts = defineField<User, NoArgs, Post[]>(...)  → FieldResolver<User, NoArgs, Post[]>
//! ```
//!
//! Only the marker type of the exported value matters; the field name is the
//! export name.

use tracing::trace;

use super::{ConventionResult, OperationSpec, StyleSighting, implementation_of};
use crate::checker::{Declaration, DeclarationForm, TypeChecker, TypeNode};
use crate::hir::extract::ExtractionContext;
use crate::hir::types::{AuthoringStyle, ExtractedTypes, OperationKind};
use crate::runtime::{self, OperationMarker, RuntimeSymbol};

pub(super) fn extract<C: TypeChecker + ?Sized>(
    ctx: &mut ExtractionContext<'_, C>,
    types: &ExtractedTypes,
    declarations: &[Declaration],
) -> ConventionResult {
    let mut result = ConventionResult::default();

    for declaration in declarations {
        let DeclarationForm::Value { ty } = &declaration.form else {
            continue;
        };
        let Some((marker, arguments)) = operation_marker(ctx, ty) else {
            trace!("[OPERATIONS] '{}' is not an operation", declaration.name);
            continue;
        };
        if result.first_seen.is_none() {
            result.first_seen = Some(StyleSighting {
                name: declaration.name.clone(),
                location: declaration.location.clone(),
            });
        }

        let arg = |index: usize| arguments.get(index);
        let (kind, parent, args, output) = match marker {
            OperationMarker::Query => (OperationKind::Query, None, arg(0), arg(1)),
            OperationMarker::Mutation => (OperationKind::Mutation, None, arg(0), arg(1)),
            OperationMarker::Field => (OperationKind::Field, arg(0), arg(1), arg(2)),
        };
        let unknown = TypeNode::Unknown;
        let spec = OperationSpec {
            kind,
            field_name: &declaration.name,
            parent: match kind {
                OperationKind::Field => Some(parent.unwrap_or(&unknown)),
                _ => None,
            },
            fallback_target: None,
            arguments: args,
            result: output.unwrap_or(&unknown),
            doc_symbol: Some(declaration.symbol),
            implementation: implementation_of(declaration, None),
            location: declaration.location.clone(),
        };
        if let Some(binding) = ctx.bind_operation(spec, types, AuthoringStyle::Modern) {
            result.bindings.push(binding);
        }
    }

    result
}

/// The operation marker a value's type originates from, with its type arguments.
fn operation_marker<'t, C: TypeChecker + ?Sized>(
    ctx: &ExtractionContext<'_, C>,
    ty: &'t TypeNode,
) -> Option<(OperationMarker, &'t [TypeNode])> {
    let named = ty.as_named()?;
    let origin = ctx.origin(named)?;
    if !ctx.is_runtime(&origin) {
        return None;
    }
    match runtime::classify(&origin.name) {
        RuntimeSymbol::Operation(marker) => Some((marker, &named.arguments)),
        _ => None,
    }
}
