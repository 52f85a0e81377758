//! Declaration extraction: one registered declaration to a declared type,
//! scalar or directive definition.

use smol_str::SmolStr;
use tracing::debug;

use super::context::{ExtractionContext, FieldSite, Position};
use super::metadata::find_tag;
use super::registry::{RegistryEntry, RegistryKind};
use crate::checker::{DeclarationForm, LiteralValue, TypeChecker, TypeNode};
use crate::hir::diagnostics::codes;
use crate::hir::types::{
    DeclarationKind, DeclaredType, DirectiveDefinition, DirectiveLocation, EnumMember,
    ScalarDefinition, SemanticKind, TypeMetadata, TypePayload,
};
use crate::runtime;

impl<C: TypeChecker + ?Sized> ExtractionContext<'_, C> {
    pub fn extract_declared(&mut self, entry: &RegistryEntry) -> Option<DeclaredType> {
        debug!("[EXTRACT] {:?} '{}'", entry.kind, entry.name);
        match entry.kind {
            RegistryKind::Object | RegistryKind::Input | RegistryKind::Interface => {
                self.extract_object(entry)
            }
            RegistryKind::Enum => self.extract_enum(entry),
            RegistryKind::LiteralEnum => self.extract_literal_enum(entry),
            RegistryKind::Union => self.extract_union(entry),
            RegistryKind::Scalar | RegistryKind::Directive => None,
        }
    }

    fn metadata(&self, entry: &RegistryEntry, kind: DeclarationKind) -> TypeMetadata {
        let (description, deprecation) = self.documentation(Some(entry.declaration.symbol));
        TypeMetadata {
            name: entry.name.clone(),
            kind,
            location: entry.declaration.location.clone(),
            description,
            deprecation,
            directives: Vec::new(),
            implements: Vec::new(),
        }
    }

    fn extract_object(&mut self, entry: &RegistryEntry) -> Option<DeclaredType> {
        let (kind, position, meta_key) = match entry.kind {
            RegistryKind::Interface => (
                DeclarationKind::Interface,
                Position::Output,
                runtime::INTERFACE_META,
            ),
            RegistryKind::Input => (DeclarationKind::Object, Position::Input, runtime::OBJECT_META),
            _ => (DeclarationKind::Object, Position::Output, runtime::OBJECT_META),
        };
        let mut metadata = self.metadata(entry, kind);
        let site = FieldSite::new(
            entry.name.as_str(),
            position,
            Some(entry.declaration.location.clone()),
        );

        let properties = self
            .checker
            .properties_of(&entry.declaration.as_type())
            .unwrap_or_default();

        if let Some(meta) = properties.iter().find(|p| p.name == meta_key) {
            let (implements, directives) = self.read_type_meta(&meta.ty, &site);
            metadata.implements = implements;
            metadata.directives = directives;
        }

        let visible = properties.iter().filter(|p| !p.is_hidden()).count();
        let fields = self.extract_fields(&properties, &site);
        if fields.is_empty() {
            let message = if visible == 0 {
                format!("Type '{}' declares no fields", entry.name)
            } else {
                format!(
                    "All {} field(s) of type '{}' were excluded",
                    visible, entry.name
                )
            };
            self.diagnostics.error(
                codes::ALL_FIELDS_EXCLUDED,
                message,
                Some(entry.declaration.location.clone()),
            );
        }

        Some(DeclaredType {
            metadata,
            payload: TypePayload::Fields(fields),
        })
    }

    fn extract_enum(&mut self, entry: &RegistryEntry) -> Option<DeclaredType> {
        let DeclarationForm::Enum { members } = &entry.declaration.form else {
            return None;
        };
        let mut values = Vec::with_capacity(members.len());
        for member in members {
            let location = member
                .location
                .clone()
                .or_else(|| Some(entry.declaration.location.clone()));
            if !matches!(member.value, LiteralValue::String(_)) {
                self.diagnostics.error(
                    codes::UNSUPPORTED_ENUM,
                    format!(
                        "Enum '{}' member '{}' has a {} value; only string enums are supported",
                        entry.name,
                        member.name,
                        member.value.kind_name()
                    ),
                    location,
                );
                continue;
            }
            let (description, deprecation) = self.documentation(member.symbol);
            values.push(EnumMember {
                name: member.name.clone(),
                value: member.value.clone(),
                description,
                deprecation,
                location,
            });
        }
        Some(DeclaredType {
            metadata: self.metadata(entry, DeclarationKind::Enum),
            payload: TypePayload::EnumMembers(values),
        })
    }

    fn extract_literal_enum(&mut self, entry: &RegistryEntry) -> Option<DeclaredType> {
        let DeclarationForm::TypeAlias {
            ty: TypeNode::Union(members),
            ..
        } = &entry.declaration.form
        else {
            return None;
        };
        let location = Some(entry.declaration.location.clone());
        let mut values = Vec::with_capacity(members.len());
        for member in members {
            match member {
                TypeNode::Literal(LiteralValue::String(value)) => values.push(EnumMember {
                    name: value.clone(),
                    value: LiteralValue::String(value.clone()),
                    description: None,
                    deprecation: None,
                    location: location.clone(),
                }),
                other => self.diagnostics.error(
                    codes::UNSUPPORTED_ENUM,
                    format!(
                        "Enum '{}' member {} is not a string literal",
                        entry.name,
                        other.describe()
                    ),
                    location.clone(),
                ),
            }
        }
        Some(DeclaredType {
            metadata: self.metadata(entry, DeclarationKind::Enum),
            payload: TypePayload::EnumMembers(values),
        })
    }

    fn extract_union(&mut self, entry: &RegistryEntry) -> Option<DeclaredType> {
        let DeclarationForm::TypeAlias {
            ty: TypeNode::Union(members),
            ..
        } = &entry.declaration.form
        else {
            return None;
        };
        let site = FieldSite::new(
            entry.name.as_str(),
            Position::Output,
            Some(entry.declaration.location.clone()),
        );
        let mut names: Vec<SmolStr> = Vec::with_capacity(members.len());
        for member in members {
            let resolved = self.resolve_type(member, &site);
            match resolved.as_ref().map(|t| &t.kind) {
                Ok(SemanticKind::Reference { name }) => {
                    if !names.contains(name) {
                        names.push(name.clone());
                    }
                }
                _ => self.diagnostics.error(
                    codes::INVALID_UNION_MEMBER,
                    format!(
                        "Union '{}' member '{}' must be a declared object type",
                        entry.name,
                        member.describe()
                    ),
                    site.location.clone(),
                ),
            }
        }
        Some(DeclaredType {
            metadata: self.metadata(entry, DeclarationKind::Union),
            payload: TypePayload::UnionMembers(names),
        })
    }

    pub fn extract_scalar(&mut self, entry: &RegistryEntry) -> ScalarDefinition {
        let (description, _) = self.documentation(Some(entry.declaration.symbol));
        ScalarDefinition {
            name: entry.name.clone(),
            only: entry.only,
            description,
            location: Some(entry.declaration.location.clone()),
        }
    }

    pub fn extract_directive(&mut self, entry: &RegistryEntry) -> Option<DirectiveDefinition> {
        let body = match &entry.declaration.form {
            DeclarationForm::TypeAlias { ty, .. } => ty.clone(),
            _ => entry.declaration.as_type(),
        };
        let location = entry.declaration.location.clone();
        let owner = format!("@{}", entry.name);
        let site = FieldSite::new(owner.as_str(), Position::Input, Some(location.clone()));

        let arguments = match find_tag(self.checker, &body, runtime::DIRECTIVE_ARGS) {
            None | Some(TypeNode::Unknown) => Vec::new(),
            Some(args) => match self.checker.properties_of(&args) {
                Some(properties) => self.extract_fields(&properties, &site),
                None => {
                    self.diagnostics.error(
                        codes::INVALID_DIRECTIVE,
                        format!(
                            "Arguments of directive '{}' must be an object type, found '{}'",
                            owner,
                            args.describe()
                        ),
                        Some(location.clone()),
                    );
                    Vec::new()
                }
            },
        };

        let raw = find_tag(self.checker, &body, runtime::DIRECTIVE_LOCATIONS)
            .and_then(|ty| self.read_directive_locations(&ty))
            .unwrap_or_default();
        let mut locations = Vec::with_capacity(raw.len());
        for text in &raw {
            match DirectiveLocation::parse(text) {
                Some(loc) if !locations.contains(&loc) => locations.push(loc),
                Some(_) => {}
                None => self.diagnostics.error(
                    codes::INVALID_DIRECTIVE,
                    format!("Directive '{}' has unknown location '{}'", owner, text),
                    Some(location.clone()),
                ),
            }
        }
        if raw.is_empty() {
            self.diagnostics.error(
                codes::INVALID_DIRECTIVE,
                format!("Directive '{}' declares no locations", owner),
                Some(location.clone()),
            );
        }
        locations.sort();

        let (description, _) = self.documentation(Some(entry.declaration.symbol));
        Some(DirectiveDefinition {
            name: entry.name.clone(),
            description,
            arguments,
            locations,
            location,
        })
    }
}
