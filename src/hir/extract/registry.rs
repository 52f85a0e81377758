//! Type registry: classifies every exported declaration under the source
//! root and assigns it a schema name.
//!
//! Field references are resolved against the registry by symbol origin, so a
//! type re-exported through any number of modules still resolves to the same
//! declared type.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use super::metadata::find_tag;
use crate::base::{SourceLocation, is_reserved_name, is_valid_name};
use crate::checker::{
    Declaration, DeclarationForm, LiteralValue, SymbolOrigin, TypeChecker, TypeNode,
};
use crate::config::{BUILTIN_SCALARS, Config, ScalarDirection};
use crate::hir::diagnostics::{Diagnostic, DiagnosticCollector, codes};
use crate::hir::operations::is_legacy_resolver_shape;
use crate::runtime;

/// Root operation type names that declarations may not use.
pub const ROOT_TYPE_NAMES: [&str; 3] = ["Query", "Mutation", "Subscription"];

/// What a registered declaration becomes in the schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    Object,
    /// An object whose name ends in `Input`.
    Input,
    Interface,
    Union,
    /// A TypeScript `enum`.
    Enum,
    /// An alias to a union of literals.
    LiteralEnum,
    Scalar,
    Directive,
}

impl RegistryKind {
    /// Kinds that occupy the type namespace.
    pub fn is_type(&self) -> bool {
        !matches!(self, RegistryKind::Directive)
    }
}

/// A classified declaration.
#[derive(Clone, Debug)]
pub struct RegistryEntry {
    pub name: SmolStr,
    pub kind: RegistryKind,
    pub declaration: Declaration,
    /// Position constraint of a declared scalar.
    pub only: Option<ScalarDirection>,
}

/// Registered declarations, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    entries: Vec<RegistryEntry>,
    by_origin: FxHashMap<SymbolOrigin, usize>,
    /// Type namespace: declared types, declared scalars and configured scalars.
    type_names: FxHashMap<SmolStr, Option<SourceLocation>>,
    directive_names: FxHashMap<SmolStr, SourceLocation>,
}

enum Classification {
    Registered {
        name: SmolStr,
        kind: RegistryKind,
        only: Option<ScalarDirection>,
    },
    /// Not a schema type, silently ignored.
    Skip(&'static str),
    /// Not a schema type, reported.
    Unsupported(String),
}

impl TypeRegistry {
    /// Classify the declarations under the configured source root.
    pub fn build<C: TypeChecker + ?Sized>(
        checker: &C,
        config: &Config,
        diagnostics: &mut DiagnosticCollector,
    ) -> Self {
        let mut registry = TypeRegistry::default();

        for mapping in &config.scalars {
            registry.type_names.entry(SmolStr::new(&mapping.name)).or_insert(None);
        }

        for declaration in checker.declarations(&config.source_root) {
            match classify(checker, config, &declaration, diagnostics) {
                Classification::Registered { name, kind, only } => {
                    debug!(
                        "[REGISTRY] {} '{}' as {:?} '{}'",
                        declaration.location, declaration.name, kind, name
                    );
                    registry.register(checker, declaration, name, kind, only, diagnostics);
                }
                Classification::Skip(reason) => {
                    trace!("[REGISTRY] skip '{}': {}", declaration.name, reason);
                }
                Classification::Unsupported(reason) => {
                    diagnostics.warning(
                        codes::UNSUPPORTED_DECLARATION,
                        format!(
                            "Declaration '{}' is not a schema type and was skipped: {}",
                            declaration.name, reason
                        ),
                        Some(declaration.location.clone()),
                    );
                }
            }
        }

        registry
    }

    fn register<C: TypeChecker + ?Sized>(
        &mut self,
        checker: &C,
        declaration: Declaration,
        name: SmolStr,
        kind: RegistryKind,
        only: Option<ScalarDirection>,
        diagnostics: &mut DiagnosticCollector,
    ) {
        let location = declaration.location.clone();

        if kind.is_type() {
            check_type_name(&name, &location, diagnostics);
            if let Some(previous) = self.type_names.get(&name) {
                let message = match previous {
                    Some(_) => format!("Type name '{}' is declared more than once", name),
                    None => format!("Type name '{}' collides with a configured scalar", name),
                };
                let mut diag =
                    Diagnostic::error(codes::DUPLICATE_TYPE_NAME, message).at(Some(location.clone()));
                if let Some(previous) = previous {
                    diag = diag.with_related(previous.clone(), "first declared here");
                }
                diagnostics.add(diag);
            } else {
                self.type_names.insert(name.clone(), Some(location.clone()));
            }
        } else {
            if !is_valid_name(&name) {
                diagnostics.error(
                    codes::INVALID_DIRECTIVE,
                    format!("Directive name '{}' is not a valid GraphQL name", name),
                    Some(location.clone()),
                );
            }
            if let Some(previous) = self.directive_names.get(&name) {
                diagnostics.add(
                    Diagnostic::error(
                        codes::DUPLICATE_TYPE_NAME,
                        format!("Directive '@{}' is declared more than once", name),
                    )
                    .at(Some(location.clone()))
                    .with_related(previous.clone(), "first declared here"),
                );
            } else {
                self.directive_names.insert(name.clone(), location.clone());
            }
        }

        let origin = checker.origin(declaration.symbol).unwrap_or(SymbolOrigin {
            module: location.file.to_string(),
            name: declaration.name.clone(),
        });
        self.by_origin.insert(origin, self.entries.len());
        self.entries.push(RegistryEntry {
            name,
            kind,
            declaration,
            only,
        });
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Entry for the declaration a symbol originates from.
    pub fn get(&self, origin: &SymbolOrigin) -> Option<&RegistryEntry> {
        self.by_origin.get(origin).map(|&index| &self.entries[index])
    }
}

fn check_type_name(name: &str, location: &SourceLocation, diagnostics: &mut DiagnosticCollector) {
    if !is_valid_name(name) {
        diagnostics.error(
            codes::INVALID_TYPE_NAME,
            format!("Type name '{}' is not a valid GraphQL name", name),
            Some(location.clone()),
        );
    } else if is_reserved_name(name) {
        diagnostics.error(
            codes::RESERVED_TYPE_NAME,
            format!("Type name '{}' is reserved for introspection", name),
            Some(location.clone()),
        );
    } else if BUILTIN_SCALARS.contains(&name) {
        diagnostics.error(
            codes::RESERVED_TYPE_NAME,
            format!("Type name '{}' collides with a built-in scalar", name),
            Some(location.clone()),
        );
    } else if ROOT_TYPE_NAMES.contains(&name) {
        diagnostics.error(
            codes::RESERVED_TYPE_NAME,
            format!(
                "Type name '{}' is reserved for the root operation type",
                name
            ),
            Some(location.clone()),
        );
    }
}

fn classify<C: TypeChecker + ?Sized>(
    checker: &C,
    config: &Config,
    declaration: &Declaration,
    diagnostics: &mut DiagnosticCollector,
) -> Classification {
    let body = match &declaration.form {
        DeclarationForm::Value { .. } => return Classification::Skip("value declaration"),
        DeclarationForm::Enum { .. } => {
            return Classification::Registered {
                name: SmolStr::new(&declaration.name),
                kind: RegistryKind::Enum,
                only: None,
            };
        }
        DeclarationForm::TypeAlias {
            type_parameters,
            ty,
        } => {
            if !type_parameters.is_empty() {
                return match directive_name(checker, ty) {
                    Some(name) => Classification::Registered {
                        name: SmolStr::new(name),
                        kind: RegistryKind::Directive,
                        only: None,
                    },
                    None => Classification::Skip("generic alias"),
                };
            }
            Some(ty)
        }
        DeclarationForm::Interface => None,
    };

    if is_legacy_resolver_shape(checker, declaration) {
        return Classification::Skip("legacy resolver shape");
    }

    if let Some(body) = body {
        if let Some(tag) = find_tag(checker, body, runtime::SCALAR_META) {
            return classify_scalar(checker, declaration, &tag, diagnostics);
        }
        if let Some(name) = directive_name(checker, body) {
            return Classification::Registered {
                name: SmolStr::new(name),
                kind: RegistryKind::Directive,
                only: None,
            };
        }
        if let TypeNode::Union(members) = body {
            return match classify_union(members) {
                Ok(kind) => Classification::Registered {
                    name: SmolStr::new(&declaration.name),
                    kind,
                    only: None,
                },
                Err(reason) => Classification::Unsupported(reason.to_string()),
            };
        }
        if let TypeNode::Named(named) = body {
            let runtime_origin = checker
                .origin(named.symbol)
                .filter(|o| o.module == config.runtime_module);
            if let Some(origin) = runtime_origin {
                if let runtime::RuntimeSymbol::Brand(_) = runtime::classify(&origin.name) {
                    // Field types resolve through the alias to the brand's scalar.
                    return Classification::Skip("alias of a built-in brand");
                }
            }
        }
    }

    match checker.properties_of(&declaration.as_type()) {
        Some(properties) => {
            let kind = if properties.iter().any(|p| p.name == runtime::INTERFACE_META) {
                RegistryKind::Interface
            } else if declaration.name.ends_with("Input") {
                RegistryKind::Input
            } else {
                RegistryKind::Object
            };
            Classification::Registered {
                name: SmolStr::new(&declaration.name),
                kind,
                only: None,
            }
        }
        None => Classification::Unsupported(match body {
            Some(ty) => format!("'{}' has no fields", ty.describe()),
            None => "no object shape".to_string(),
        }),
    }
}

fn directive_name<C: TypeChecker + ?Sized>(checker: &C, body: &TypeNode) -> Option<String> {
    let tag = find_tag(checker, body, runtime::DIRECTIVE_NAME)?;
    match checker.literal_value(&tag) {
        Some(LiteralValue::String(name)) => Some(name),
        _ => None,
    }
}

fn classify_scalar<C: TypeChecker + ?Sized>(
    checker: &C,
    declaration: &Declaration,
    tag: &TypeNode,
    diagnostics: &mut DiagnosticCollector,
) -> Classification {
    let properties = checker.properties_of(tag).unwrap_or_default();
    let name = properties
        .iter()
        .find(|p| p.name == runtime::SCALAR_NAME)
        .and_then(|p| checker.literal_value(&p.ty))
        .and_then(|v| v.as_str().map(SmolStr::new));
    let Some(name) = name else {
        return Classification::Unsupported("scalar tag without a literal name".to_string());
    };

    let only = properties
        .iter()
        .find(|p| p.name == runtime::SCALAR_ONLY)
        .and_then(|p| checker.literal_value(&p.ty));
    let only = match only.as_ref().and_then(LiteralValue::as_str) {
        None => None,
        Some("input") => Some(ScalarDirection::Input),
        Some("output") => Some(ScalarDirection::Output),
        Some(other) => {
            diagnostics.error(
                codes::UNSUPPORTED_DECLARATION,
                format!(
                    "Scalar '{}' restricts usage to '{}'; expected 'input' or 'output'",
                    name, other
                ),
                Some(declaration.location.clone()),
            );
            None
        }
    };

    Classification::Registered {
        name,
        kind: RegistryKind::Scalar,
        only,
    }
}

fn classify_union(members: &[TypeNode]) -> Result<RegistryKind, &'static str> {
    if members.iter().any(TypeNode::is_nullish) {
        return Err("nullable union alias");
    }
    let is_enum_literal = |m: &TypeNode| {
        matches!(
            m,
            TypeNode::Literal(LiteralValue::Number(_) | LiteralValue::String(_))
        )
    };
    if members.iter().all(is_enum_literal) {
        return Ok(RegistryKind::LiteralEnum);
    }
    if members.iter().all(|m| matches!(m, TypeNode::Named(_))) {
        return Ok(RegistryKind::Union);
    }
    Err("union mixes literals and types")
}
