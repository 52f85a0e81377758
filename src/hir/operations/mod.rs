//! Operation extraction: queries, mutations and field resolvers.
//!
//! Two authoring conventions exist:
//!
//! - [`modern`] - exported values built by the operation-defining functions
//!   (`QueryResolver`, `MutationResolver`, `FieldResolver` markers)
//! - [`legacy`] - an `XResolver` shape paired with an `xResolver` value
//!
//! Both are always scanned; mixing them is reported once, with a location of
//! each style, after both have run.

mod legacy;
mod modern;

#[cfg(test)]
mod tests;

use smol_str::SmolStr;
use tracing::debug;

use crate::base::{SourceLocation, is_reserved_name, is_valid_name};
use crate::checker::{Declaration, SymbolId, TypeChecker, TypeNode};
use crate::config::Config;
use crate::hir::diagnostics::{Diagnostic, DiagnosticCollector, codes};
use crate::hir::extract::{ExtractionContext, FieldSite, Position, TypeRegistry};
use crate::hir::types::{
    AuthoringStyle, DeclarationKind, DirectiveApplication, ExtractedTypes, FieldDefinition, ImplementationRef,
    OperationBinding, OperationKind, SemanticType,
};

pub(crate) use legacy::is_legacy_resolver_shape;

/// Where an authoring style was first seen.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct StyleSighting {
    pub name: String,
    pub location: SourceLocation,
}

/// Bindings found by one convention.
#[derive(Debug, Default)]
pub(crate) struct ConventionResult {
    pub bindings: Vec<OperationBinding>,
    pub first_seen: Option<StyleSighting>,
}

/// Extract operations under the resolver root.
///
/// Returns no bindings when both conventions are present.
pub fn extract_operations<C: TypeChecker + ?Sized>(
    checker: &C,
    config: &Config,
    registry: &TypeRegistry,
    types: &ExtractedTypes,
    diagnostics: &mut DiagnosticCollector,
) -> Vec<OperationBinding> {
    let declarations = checker.declarations(config.resolver_root());
    let mut ctx = ExtractionContext::new(checker, config, registry, diagnostics);

    let modern = modern::extract(&mut ctx, types, &declarations);
    let legacy = legacy::extract(&mut ctx, types, &declarations);

    if let (Some(old), Some(new)) = (&legacy.first_seen, &modern.first_seen) {
        ctx.diagnostics.add(
            Diagnostic::error(
                codes::LEGACY_API_DETECTED,
                format!(
                    "Legacy resolver shapes (e.g. '{}' at {}) cannot be mixed with operation-defining functions (e.g. '{}' at {}); migrate every resolver to one convention",
                    old.name, old.location, new.name, new.location
                ),
            )
            .at(Some(old.location.clone()))
            .with_related(new.location.clone(), "operation-defining function used here"),
        );
        return Vec::new();
    }

    let mut bindings = modern.bindings;
    bindings.extend(legacy.bindings);
    check_duplicates(&bindings, ctx.diagnostics);

    bindings.sort_by(|a, b| {
        (&a.target, &a.field_name, &a.implementation).cmp(&(&b.target, &b.field_name, &b.implementation))
    });
    debug!("[OPERATIONS] {} bindings", bindings.len());
    bindings
}

fn check_duplicates(bindings: &[OperationBinding], diagnostics: &mut DiagnosticCollector) {
    for (i, binding) in bindings.iter().enumerate() {
        let first = bindings[..i]
            .iter()
            .find(|b| b.target == binding.target && b.field_name == binding.field_name);
        if let Some(first) = first {
            diagnostics.add(
                Diagnostic::error(
                    codes::DUPLICATE_OPERATION_FIELD,
                    format!(
                        "Field '{}.{}' is defined by both '{}' and '{}'",
                        binding.target, binding.field_name, first.implementation, binding.implementation
                    ),
                )
                .at(Some(binding.location.clone()))
                .with_related(first.location.clone(), "first defined here"),
            );
        }
    }
}

/// Everything about one operation except how it was authored.
pub(crate) struct OperationSpec<'t> {
    pub kind: OperationKind,
    pub field_name: &'t str,
    /// Declared parent type for field resolvers.
    pub parent: Option<&'t TypeNode>,
    /// Target name when no parent type is declared.
    pub fallback_target: Option<&'t str>,
    pub arguments: Option<&'t TypeNode>,
    pub result: &'t TypeNode,
    /// Symbol carrying documentation.
    pub doc_symbol: Option<SymbolId>,
    pub implementation: ImplementationRef,
    pub location: SourceLocation,
}

impl<C: TypeChecker + ?Sized> ExtractionContext<'_, C> {
    /// Build a binding, reporting and dropping operations that cannot be bound.
    pub(crate) fn bind_operation(
        &mut self,
        spec: OperationSpec<'_>,
        types: &ExtractedTypes,
        style: AuthoringStyle,
    ) -> Option<OperationBinding> {
        let location = Some(spec.location.clone());
        if !is_valid_name(spec.field_name) || is_reserved_name(spec.field_name) {
            let code = if is_valid_name(spec.field_name) {
                codes::RESERVED_FIELD_NAME
            } else {
                codes::INVALID_FIELD_NAME
            };
            self.diagnostics.error(
                code,
                format!(
                    "Operation '{}' cannot be used as a GraphQL field name",
                    spec.field_name
                ),
                location,
            );
            return None;
        }

        let (target, parent) = match spec.kind.root_name() {
            Some(root) => (SmolStr::new(root), None),
            None => {
                let parent = match (spec.parent, spec.fallback_target) {
                    (Some(parent), _) => self.resolve_parent(parent, types, &spec)?,
                    (None, Some(target)) => SmolStr::new(target),
                    (None, None) => return None,
                };
                let target = spec.fallback_target.map(SmolStr::new).unwrap_or(parent.clone());
                (target, Some(parent))
            }
        };

        let owner = format!("{}.{}", target, spec.field_name);
        let arguments = self.extract_arguments(spec.arguments, &owner, &spec.location)?;
        let (return_type, directives) = self.extract_result(spec.result, &target, spec.field_name, &spec.location)?;
        let (description, deprecation) = self.documentation(spec.doc_symbol);

        Some(OperationBinding {
            kind: spec.kind,
            field_name: SmolStr::new(spec.field_name),
            arguments,
            return_type,
            target,
            parent,
            style,
            implementation: spec.implementation,
            description,
            deprecation,
            directives,
            location: spec.location,
        })
    }

    /// The declared object or interface a field resolver extends.
    fn resolve_parent(
        &mut self,
        parent: &TypeNode,
        types: &ExtractedTypes,
        spec: &OperationSpec<'_>,
    ) -> Option<SmolStr> {
        let inner = match parent {
            TypeNode::Union(members) => {
                let rest: Vec<&TypeNode> = members.iter().filter(|m| !m.is_nullish()).collect();
                match rest.as_slice() {
                    [single] => *single,
                    _ => parent,
                }
            }
            other => other,
        };
        let declared = inner
            .as_named()
            .and_then(|named| self.registered_name(named))
            .and_then(|name| types.get(&name))
            .filter(|declared| {
                matches!(
                    declared.metadata.kind,
                    DeclarationKind::Object | DeclarationKind::Interface
                ) && !declared.metadata.name.ends_with("Input")
            });
        match declared {
            Some(declared) => Some(declared.metadata.name.clone()),
            None => {
                self.diagnostics.error(
                    codes::MISSING_PARENT_TYPE,
                    format!(
                        "Field resolver '{}' extends '{}', which is not a declared object or interface type",
                        spec.field_name,
                        parent.describe()
                    ),
                    Some(spec.location.clone()),
                );
                None
            }
        }
    }

    fn extract_arguments(
        &mut self,
        arguments: Option<&TypeNode>,
        owner: &str,
        location: &SourceLocation,
    ) -> Option<Vec<FieldDefinition>> {
        let Some(arguments) = arguments else {
            return Some(Vec::new());
        };
        if matches!(arguments, TypeNode::Unknown | TypeNode::Undefined) {
            return Some(Vec::new());
        }
        match self.checker.properties_of(arguments) {
            Some(properties) => {
                let site = FieldSite::new(owner, Position::Input, Some(location.clone()));
                let mut fields = self.extract_fields(&properties, &site);
                fields.sort_by(|a, b| a.name.cmp(&b.name));
                Some(fields)
            }
            None => {
                self.diagnostics.error(
                    codes::INVALID_ARGUMENTS_TYPE,
                    format!(
                        "Arguments of '{}' must be an object type, found '{}'",
                        owner,
                        arguments.describe()
                    ),
                    Some(location.clone()),
                );
                None
            }
        }
    }

    /// Return type with async wrappers and field metadata removed.
    fn extract_result(
        &mut self,
        result: &TypeNode,
        target: &str,
        field: &str,
        location: &SourceLocation,
    ) -> Option<(SemanticType, Vec<DirectiveApplication>)> {
        let awaited = self.checker.awaited_type(result).unwrap_or_else(|| result.clone());
        let unwrapped = self.unwrap_field_meta(&awaited);
        let site = FieldSite::new(target, Position::Output, Some(location.clone()));
        let ty = self.resolve_field_type(&unwrapped.ty, &site, field, Some(location.clone()))?;
        let directives = match &unwrapped.meta {
            Some(meta) => {
                self.read_field_meta(meta, &site, field, Some(location.clone()))
                    .directives
            }
            None => Vec::new(),
        };
        Some((ty.with_nullable(unwrapped.nullable), directives))
    }
}

/// Implementation reference for an exported value.
pub(crate) fn implementation_of(value: &Declaration, property: Option<&str>) -> ImplementationRef {
    ImplementationRef {
        module: value.location.file.to_string(),
        export: SmolStr::new(&value.name),
        property: property.map(SmolStr::new),
    }
}
