//! Field extraction and type resolution.
//!
//! Shapes are always obtained from the checker's flattened property lists.
//! Selection and optionality transformations are never matched by name.

use tracing::trace;

use super::context::{Excluded, ExtractionContext, FieldSite};
use super::metadata::find_tag;
use super::registry::RegistryKind;
use crate::base::{SourceLocation, is_reserved_name, is_valid_name};
use crate::checker::{LiteralValue, NamedType, Property, TypeChecker, TypeNode};
use crate::hir::diagnostics::codes;
use crate::hir::types::{FieldDefinition, PrimitiveKind, SemanticKind, SemanticType};
use crate::runtime::{self, RuntimeSymbol};

impl<C: TypeChecker + ?Sized> ExtractionContext<'_, C> {
    /// Extract every visible property as a field; excluded ones are reported.
    pub fn extract_fields(&mut self, properties: &[Property], site: &FieldSite) -> Vec<FieldDefinition> {
        properties
            .iter()
            .filter(|p| !p.is_hidden())
            .filter_map(|p| self.extract_field(p, site))
            .collect()
    }

    pub fn extract_field(&mut self, property: &Property, site: &FieldSite) -> Option<FieldDefinition> {
        let location = property.location.clone().or_else(|| site.location.clone());

        if !is_valid_name(&property.name) {
            self.diagnostics.warning(
                codes::INVALID_FIELD_NAME,
                format!(
                    "Field '{}' of '{}' is not a valid GraphQL name and was excluded",
                    property.name, site.owner
                ),
                location,
            );
            return None;
        }
        if is_reserved_name(&property.name) {
            self.diagnostics.warning(
                codes::RESERVED_FIELD_NAME,
                format!(
                    "Field '{}' of '{}' uses the reserved '__' prefix and was excluded",
                    property.name, site.owner
                ),
                location,
            );
            return None;
        }

        let unwrapped = self.unwrap_field_meta(&property.ty);
        let ty = self.resolve_field_type(&unwrapped.ty, site, &property.name, location.clone())?;

        let (description, deprecation) = self.documentation(property.symbol);
        let mut field = FieldDefinition::new(property.name.as_str(), ty.with_nullable(unwrapped.nullable));
        field.optional = property.optional;
        field.description = description;
        field.deprecation = deprecation;
        field.location = location.clone();

        if let Some(meta) = &unwrapped.meta {
            let meta = self.read_field_meta(meta, site, &property.name, location);
            field.directives = meta.directives;
            field.default_value = meta.default_value;
        }
        Some(field)
    }

    /// Resolve a field type, excluding it with a warning when it has no
    /// schema representation.
    pub fn resolve_field_type(
        &mut self,
        ty: &TypeNode,
        site: &FieldSite,
        field: &str,
        location: Option<SourceLocation>,
    ) -> Option<SemanticType> {
        let nested = site.nested(field, location.clone());
        let resolved = self
            .resolve_type(ty, &nested)
            .and_then(|resolved| match unsupported_reason(&resolved) {
                Some(reason) => Err(Excluded::new(reason)),
                None => Ok(resolved),
            });
        match resolved {
            Ok(resolved) => Some(resolved),
            Err(Excluded(reason)) => {
                self.diagnostics.warning(
                    codes::UNSUPPORTED_FIELD_TYPE,
                    format!(
                        "Field '{}.{}' was excluded: {}",
                        site.owner, field, reason
                    ),
                    location,
                );
                None
            }
        }
    }

    /// Translate a checker type into a semantic type.
    ///
    /// `site` names the field being resolved; inline object fields are
    /// extracted beneath it.
    pub fn resolve_type(&mut self, ty: &TypeNode, site: &FieldSite) -> Result<SemanticType, Excluded> {
        match ty {
            TypeNode::Boolean => Ok(SemanticType::primitive(PrimitiveKind::Boolean)),
            TypeNode::Number => Ok(SemanticType::primitive(PrimitiveKind::Number)),
            TypeNode::String => Ok(SemanticType::primitive(PrimitiveKind::String)),
            TypeNode::Literal(LiteralValue::Null) | TypeNode::Null | TypeNode::Undefined => {
                Err(Excluded::new("type is always null"))
            }
            TypeNode::Literal(
                value @ (LiteralValue::Boolean(_) | LiteralValue::Number(_) | LiteralValue::String(_)),
            ) => Ok(SemanticType::new(SemanticKind::Literal(value.clone()))),
            TypeNode::Literal(_) => Err(Excluded::new("structured literal types are not supported")),
            TypeNode::Unknown => Err(Excluded::new("type has no schema representation")),
            TypeNode::Tuple(_) => Err(Excluded::new("tuple types are not supported")),
            TypeNode::Function(_) => Err(Excluded::new("function types are not supported")),
            TypeNode::Array(element) => {
                let element = self.resolve_type(element, site)?;
                Ok(SemanticType::array(element))
            }
            TypeNode::Union(members) => self.resolve_union(members, site),
            TypeNode::Intersection(_) => {
                if let Some(tag) = find_tag(self.checker, ty, runtime::SCALAR_META) {
                    return Ok(self.inline_scalar(&tag, site));
                }
                match self.checker.properties_of(ty) {
                    Some(properties) => Ok(self.inline_object(&properties, site)),
                    None => Err(Excluded::new(format!(
                        "intersection '{}' has no object shape",
                        ty.describe()
                    ))),
                }
            }
            TypeNode::Object(properties) => Ok(self.inline_object(properties, site)),
            TypeNode::TypeParameter { name, constraint } => match constraint {
                Some(constraint) => self.resolve_type(constraint, site),
                None => Err(Excluded::new(format!(
                    "type parameter '{}' has no constraint",
                    name
                ))),
            },
            TypeNode::Named(named) => self.resolve_named(named, ty, site),
        }
    }

    fn resolve_union(&mut self, members: &[TypeNode], site: &FieldSite) -> Result<SemanticType, Excluded> {
        let nullable = members.iter().any(TypeNode::is_nullish);
        let rest: Vec<&TypeNode> = members.iter().filter(|m| !m.is_nullish()).collect();

        match rest.as_slice() {
            [] => Err(Excluded::new("type is always null")),
            [single] => Ok(self.resolve_type(single, site)?.with_nullable(nullable)),
            _ if rest
                .iter()
                .all(|m| matches!(m, TypeNode::Literal(LiteralValue::Boolean(_)) | TypeNode::Boolean)) =>
            {
                Ok(SemanticType::primitive(PrimitiveKind::Boolean).with_nullable(nullable))
            }
            _ => {
                let members = rest
                    .iter()
                    .map(|m| self.resolve_type(m, site))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SemanticType::new(SemanticKind::Union { members }).with_nullable(nullable))
            }
        }
    }

    fn resolve_named(
        &mut self,
        named: &NamedType,
        ty: &TypeNode,
        site: &FieldSite,
    ) -> Result<SemanticType, Excluded> {
        if let Some(origin) = self.origin(named) {
            if let Some(mapping) = self.config_scalar(&origin) {
                return Ok(SemanticType::scalar(mapping.name.as_str(), mapping.only));
            }

            if let Some(entry) = self.registry.get(&origin) {
                return match entry.kind {
                    RegistryKind::Scalar => Ok(SemanticType::scalar(entry.name.clone(), entry.only)),
                    RegistryKind::Directive => Err(Excluded::new(format!(
                        "directive '{}' is not a type",
                        entry.name
                    ))),
                    _ => Ok(SemanticType::reference(entry.name.clone())),
                };
            }

            if self.is_runtime(&origin) {
                match runtime::classify(&origin.name) {
                    RuntimeSymbol::Brand(scalar) => return Ok(SemanticType::scalar(scalar, None)),
                    RuntimeSymbol::Wrapper => {
                        if let Some(resolved) = self.checker.resolve_alias(named) {
                            return self.resolve_type(&resolved, site);
                        }
                    }
                    RuntimeSymbol::NoArgs => {
                        return Err(Excluded::new("'NoArgs' only describes argument lists"));
                    }
                    RuntimeSymbol::Operation(_) => {
                        return Err(Excluded::new(format!(
                            "operation marker '{}' is not a field type",
                            origin.name
                        )));
                    }
                    RuntimeSymbol::Unknown => {
                        self.diagnostics.error(
                            codes::UNKNOWN_BRAND,
                            format!(
                                "'{}' is not a known export of '{}' (used by '{}')",
                                origin.name, origin.module, site.owner
                            ),
                            site.location.clone(),
                        );
                        return Ok(SemanticType::reference(origin.name.as_str()));
                    }
                }
            }
        }

        if let Some(resolved) = self.checker.resolve_alias(named) {
            if self.expanding.contains(&named.symbol) {
                self.diagnostics.error(
                    codes::UNRESOLVED_REFERENCE,
                    format!(
                        "Recursive type '{}' used by '{}' must be exported as a schema type",
                        named.name, site.owner
                    ),
                    site.location.clone(),
                );
                return Ok(SemanticType::reference(named.name.as_str()));
            }
            trace!("[EXTRACT] expanding alias '{}' for '{}'", named.name, site.owner);
            self.expanding.push(named.symbol);
            let result = self.resolve_type(&resolved, site);
            self.expanding.pop();
            return result;
        }

        if !named.arguments.is_empty() {
            if let Some(properties) = self.checker.properties_of(ty) {
                return Ok(self.inline_object(&properties, site));
            }
        }

        self.diagnostics.error(
            codes::UNRESOLVED_REFERENCE,
            format!(
                "Type '{}' used by '{}' is not a declared type or scalar",
                named.name, site.owner
            ),
            site.location.clone(),
        );
        Ok(SemanticType::reference(named.name.as_str()))
    }

    fn inline_object(&mut self, properties: &[Property], site: &FieldSite) -> SemanticType {
        let fields = self.extract_fields(properties, site);
        SemanticType::new(SemanticKind::InlineObject { fields })
    }

    /// A scalar tag written directly in a field type must name a declared scalar.
    fn inline_scalar(&mut self, tag: &TypeNode, site: &FieldSite) -> SemanticType {
        let name = self
            .checker
            .properties_of(tag)
            .and_then(|props| props.into_iter().find(|p| p.name == runtime::SCALAR_NAME))
            .and_then(|p| self.checker.literal_value(&p.ty))
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        let entry = self
            .registry
            .entries()
            .iter()
            .find(|e| e.kind == RegistryKind::Scalar && e.name == name);
        match entry {
            Some(entry) => SemanticType::scalar(entry.name.clone(), entry.only),
            None => {
                self.diagnostics.error(
                    codes::UNRESOLVED_REFERENCE,
                    format!(
                        "Scalar '{}' used by '{}' must be declared as an exported type",
                        name, site.owner
                    ),
                    site.location.clone(),
                );
                SemanticType::scalar(name, None)
            }
        }
    }
}

/// Reasons a resolved type cannot be used as a field type.
fn unsupported_reason(ty: &SemanticType) -> Option<&'static str> {
    match &ty.kind {
        SemanticKind::Union { .. } => {
            Some("inline unions are not supported; declare a named union or enum type")
        }
        SemanticKind::InlineObject { fields } if fields.is_empty() => {
            Some("inline object has no representable fields")
        }
        SemanticKind::Array { element } => unsupported_reason(element),
        _ => None,
    }
}
