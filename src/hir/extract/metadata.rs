//! Metadata unwrapping: phantom tags carried by intersections.
//!
//! A field written as `GqlField<T, { directives: [...], defaultValue: ... }>`
//! resolves to `T & { " $fieldMeta"?: {...} }`. The tag is split off here so
//! that only `(T, metadata)` pairs leave the extractor.

use smol_str::SmolStr;

use super::context::{ExtractionContext, FieldSite, Position};
use crate::base::SourceLocation;
use crate::checker::{LiteralValue, NamedType, Property, TypeChecker, TypeNode};
use crate::hir::diagnostics::codes;
use crate::hir::types::DirectiveApplication;
use crate::runtime::{self, RuntimeSymbol};

/// A field type with its metadata tag removed.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Unwrapped {
    pub ty: TypeNode,
    pub meta: Option<TypeNode>,
    /// The wrapper itself was in a nullable union.
    pub nullable: bool,
}

impl Unwrapped {
    fn plain(ty: &TypeNode) -> Self {
        Self {
            ty: ty.clone(),
            meta: None,
            nullable: false,
        }
    }
}

/// Field metadata after evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct FieldMeta {
    pub directives: Vec<DirectiveApplication>,
    pub default_value: Option<LiteralValue>,
}

/// Find a hidden tag property on a type, looking through aliases and intersections.
pub(crate) fn find_tag<C: TypeChecker + ?Sized>(
    checker: &C,
    ty: &TypeNode,
    key: &str,
) -> Option<TypeNode> {
    match ty {
        TypeNode::Intersection(parts) => parts.iter().find_map(|p| find_tag(checker, p, key)),
        TypeNode::Object(properties) => tag_in(properties, key),
        TypeNode::Named(named) => match checker.resolve_alias(named) {
            Some(resolved) => find_tag(checker, &resolved, key),
            None => tag_in(&checker.properties_of(ty)?, key),
        },
        _ => None,
    }
}

fn tag_in(properties: &[Property], key: &str) -> Option<TypeNode> {
    properties
        .iter()
        .find(|p| p.name == key)
        .map(|p| p.ty.clone())
}

/// String values of a literal or a union of string literals.
pub(crate) fn string_literals(members: &[TypeNode]) -> Option<Vec<String>> {
    members
        .iter()
        .map(|m| match m {
            TypeNode::Literal(LiteralValue::String(s)) => Some(s.clone()),
            _ => None,
        })
        .collect()
}

fn literal_strings(ty: &TypeNode) -> Option<Vec<String>> {
    match ty {
        TypeNode::Union(members) => string_literals(members),
        single => string_literals(std::slice::from_ref(single)),
    }
}

impl<C: TypeChecker + ?Sized> ExtractionContext<'_, C> {
    /// Check if a reference is one of the transparent runtime wrappers.
    pub fn is_runtime_wrapper(&self, named: &NamedType) -> bool {
        self.origin(named).is_some_and(|origin| {
            self.is_runtime(&origin) && runtime::classify(&origin.name) == RuntimeSymbol::Wrapper
        })
    }

    /// Split a field type into its real type and its `" $fieldMeta"` tag.
    pub fn unwrap_field_meta(&self, ty: &TypeNode) -> Unwrapped {
        match ty {
            TypeNode::Union(members) => {
                let rest: Vec<&TypeNode> = members.iter().filter(|m| !m.is_nullish()).collect();
                if rest.len() == 1 && rest.len() < members.len() {
                    let inner = self.unwrap_field_meta(rest[0]);
                    if inner.meta.is_some() {
                        return Unwrapped {
                            nullable: true,
                            ..inner
                        };
                    }
                }
                Unwrapped::plain(ty)
            }
            TypeNode::Named(named) if self.is_runtime_wrapper(named) => {
                match self.checker.resolve_alias(named) {
                    Some(resolved) if matches!(resolved, TypeNode::Intersection(_)) => {
                        let inner = self.unwrap_field_meta(&resolved);
                        if inner.meta.is_some() {
                            inner
                        } else {
                            Unwrapped::plain(ty)
                        }
                    }
                    _ => Unwrapped::plain(ty),
                }
            }
            TypeNode::Intersection(parts) => {
                let meta_index = parts.iter().position(|part| match part {
                    TypeNode::Object(properties) => {
                        properties.iter().any(|p| p.name == runtime::FIELD_META)
                            && properties.iter().all(Property::is_hidden)
                    }
                    _ => false,
                });
                let Some(index) = meta_index else {
                    return Unwrapped::plain(ty);
                };
                let meta = match &parts[index] {
                    TypeNode::Object(properties) => tag_in(properties, runtime::FIELD_META),
                    _ => None,
                };
                let mut rest: Vec<TypeNode> = parts
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .map(|(_, part)| part.clone())
                    .collect();
                let real = if rest.len() == 1 {
                    rest.remove(0)
                } else {
                    TypeNode::Intersection(rest)
                };
                Unwrapped {
                    ty: real,
                    meta,
                    nullable: false,
                }
            }
            _ => Unwrapped::plain(ty),
        }
    }

    /// Evaluate a field metadata object (`{ directives?, defaultValue? }`).
    pub fn read_field_meta(
        &mut self,
        meta: &TypeNode,
        site: &FieldSite,
        field: &str,
        location: Option<SourceLocation>,
    ) -> FieldMeta {
        let mut result = FieldMeta::default();
        let properties = self.checker.properties_of(meta).unwrap_or_default();

        if let Some(directives) = tag_in(&properties, runtime::META_DIRECTIVES) {
            let target = format!("{}.{}", site.owner, field);
            result.directives = self.read_directives(&directives, &target, location.clone());
        }

        let Some(default) = tag_in(&properties, runtime::META_DEFAULT_VALUE) else {
            return result;
        };
        match self.checker.literal_value(&default) {
            Some(value) if site.position == Position::Input => result.default_value = Some(value),
            Some(_) => self.diagnostics.warning(
                codes::INVALID_DEFAULT_VALUE,
                format!(
                    "Default value on output field '{}.{}' has no effect and was ignored",
                    site.owner, field
                ),
                location,
            ),
            None => self.diagnostics.error(
                codes::INVALID_DEFAULT_VALUE,
                format!(
                    "Default value of '{}.{}' must be a literal value, found '{}'",
                    site.owner,
                    field,
                    default.describe()
                ),
                location,
            ),
        }
        result
    }

    /// Evaluate a tuple of directive applications on `target`.
    pub fn read_directives(
        &mut self,
        ty: &TypeNode,
        target: &str,
        location: Option<SourceLocation>,
    ) -> Vec<DirectiveApplication> {
        let items = match ty {
            TypeNode::Tuple(items) => items.clone(),
            TypeNode::Array(element) => vec![element.as_ref().clone()],
            TypeNode::Unknown | TypeNode::Undefined => Vec::new(),
            other => vec![other.clone()],
        };
        items
            .iter()
            .filter_map(|item| self.read_directive(item, target, &location))
            .collect()
    }

    fn read_directive(
        &mut self,
        ty: &TypeNode,
        target: &str,
        location: &Option<SourceLocation>,
    ) -> Option<DirectiveApplication> {
        let name = find_tag(self.checker, ty, runtime::DIRECTIVE_NAME)
            .and_then(|tag| self.checker.literal_value(&tag))
            .and_then(|value| value.as_str().map(SmolStr::new));
        let Some(name) = name else {
            self.diagnostics.error(
                codes::INVALID_DIRECTIVE,
                format!("'{}' applied to '{}' is not a directive", ty.describe(), target),
                location.clone(),
            );
            return None;
        };

        let args = find_tag(self.checker, ty, runtime::DIRECTIVE_ARGS);
        let arguments = match args.as_ref().map(|a| (a, self.checker.literal_value(a))) {
            None | Some((TypeNode::Unknown, _)) => Vec::new(),
            Some((_, Some(LiteralValue::Object(entries)))) => entries
                .into_iter()
                .map(|(key, value)| (SmolStr::new(key), value))
                .collect(),
            Some((args, _)) => {
                self.diagnostics.error(
                    codes::INVALID_DIRECTIVE,
                    format!(
                        "Arguments of directive '@{}' on '{}' must be an object of literal values, found '{}'",
                        name,
                        target,
                        args.describe()
                    ),
                    location.clone(),
                );
                return None;
            }
        };

        Some(DirectiveApplication { name, arguments })
    }

    /// Directive locations of a directive definition.
    pub fn read_directive_locations(&self, ty: &TypeNode) -> Option<Vec<String>> {
        let resolved = match ty {
            TypeNode::Named(named) => self.checker.resolve_alias(named)?,
            other => other.clone(),
        };
        literal_strings(&resolved)
    }

    /// Evaluate object or interface metadata (`{ implements?, directives? }`).
    pub fn read_type_meta(
        &mut self,
        meta: &TypeNode,
        site: &FieldSite,
    ) -> (Vec<SmolStr>, Vec<DirectiveApplication>) {
        let properties = self.checker.properties_of(meta).unwrap_or_default();
        let mut implements = Vec::new();

        if let Some(list) = tag_in(&properties, runtime::META_IMPLEMENTS) {
            let items = match list {
                TypeNode::Tuple(items) => items,
                TypeNode::Unknown => Vec::new(),
                other => vec![other],
            };
            for item in items {
                let name = item.as_named().and_then(|named| self.registered_name(named));
                match name {
                    Some(name) => implements.push(name),
                    None => self.diagnostics.error(
                        codes::UNRESOLVED_REFERENCE,
                        format!(
                            "Interface '{}' implemented by '{}' is not a declared type",
                            item.describe(),
                            site.owner
                        ),
                        site.location.clone(),
                    ),
                }
            }
        }

        let directives = match tag_in(&properties, runtime::META_DIRECTIVES) {
            Some(list) => self.read_directives(&list, &site.owner, site.location.clone()),
            None => Vec::new(),
        };
        (implements, directives)
    }
}
