//! Paired resolver shapes.
//!
//! ```text
//! export type UserResolver = { posts: (parent: User, args: PostsArgs) => Post[] }
//! export const userResolver: UserResolver = { posts: ... }
//! ```
//!
//! Each function property is one field. `QueryResolver`/`MutationResolver`
//! shapes contribute root fields; any other `XResolver` extends `X`.

use crate::base::naming::lower_first;
use crate::checker::{Declaration, DeclarationForm, TypeChecker, TypeNode};
use crate::hir::diagnostics::codes;
use crate::hir::extract::ExtractionContext;
use crate::hir::types::{AuthoringStyle, ExtractedTypes, OperationKind};
use crate::runtime::LEGACY_RESOLVER_SUFFIX;

use super::{ConventionResult, OperationSpec, StyleSighting, implementation_of};

/// Check if a declaration is an `XResolver` shape with function properties.
pub(crate) fn is_legacy_resolver_shape<C: TypeChecker + ?Sized>(
    checker: &C,
    declaration: &Declaration,
) -> bool {
    let Some(stem) = declaration.name.strip_suffix(LEGACY_RESOLVER_SUFFIX) else {
        return false;
    };
    let plain_shape = match &declaration.form {
        DeclarationForm::Interface => true,
        DeclarationForm::TypeAlias {
            type_parameters, ..
        } => type_parameters.is_empty(),
        _ => false,
    };
    !stem.is_empty()
        && plain_shape
        && checker
            .properties_of(&declaration.as_type())
            .is_some_and(|props| {
                props
                    .iter()
                    .any(|p| matches!(p.ty, TypeNode::Function(_)))
            })
}

pub(super) fn extract<C: TypeChecker + ?Sized>(
    ctx: &mut ExtractionContext<'_, C>,
    types: &ExtractedTypes,
    declarations: &[Declaration],
) -> ConventionResult {
    let checker = ctx.checker;
    let mut result = ConventionResult::default();

    for shape in declarations
        .iter()
        .filter(|d| is_legacy_resolver_shape(checker, d))
    {
        if result.first_seen.is_none() {
            result.first_seen = Some(StyleSighting {
                name: shape.name.clone(),
                location: shape.location.clone(),
            });
        }

        let stem = &shape.name[..shape.name.len() - LEGACY_RESOLVER_SUFFIX.len()];
        let value_name = lower_first(&shape.name);
        let Some(value) = declarations
            .iter()
            .find(|d| d.is_value() && d.name == value_name)
        else {
            ctx.diagnostics.error(
                codes::MISSING_RESOLVER_VALUE,
                format!(
                    "Resolver type '{}' has no matching exported value '{}'",
                    shape.name, value_name
                ),
                Some(shape.location.clone()),
            );
            continue;
        };

        let kind = match stem {
            "Query" => OperationKind::Query,
            "Mutation" => OperationKind::Mutation,
            _ => OperationKind::Field,
        };
        let properties = checker.properties_of(&shape.as_type()).unwrap_or_default();

        for property in properties.iter().filter(|p| !p.is_hidden()) {
            let location = property
                .location
                .clone()
                .unwrap_or_else(|| shape.location.clone());
            let TypeNode::Function(signature) = &property.ty else {
                ctx.diagnostics.error(
                    codes::INVALID_RESOLVER_SIGNATURE,
                    format!(
                        "Property '{}' of '{}' must be a resolver function, found '{}'",
                        property.name,
                        shape.name,
                        property.ty.describe()
                    ),
                    Some(location),
                );
                continue;
            };

            let parameter = |index: usize| signature.parameters.get(index).map(|p| &p.ty);
            let spec = OperationSpec {
                kind,
                field_name: &property.name,
                parent: match kind {
                    OperationKind::Field => parameter(0),
                    _ => None,
                },
                fallback_target: match kind {
                    OperationKind::Field => Some(stem),
                    _ => None,
                },
                arguments: parameter(1),
                result: &signature.return_type,
                doc_symbol: property.symbol,
                implementation: implementation_of(value, Some(&property.name)),
                location,
            };
            if let Some(binding) = ctx.bind_operation(spec, types, AuthoringStyle::Legacy) {
                result.bindings.push(binding);
            }
        }
    }

    result
}
