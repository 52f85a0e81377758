//! Semantic model → schema model.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use super::defaults::coerce_defaults;
use super::naming::InlineScope;
use super::types::{
    ConvertedSchema, EnumValueDefinition, FieldType, InputValue, OperationField, SchemaDirective,
    SchemaField, TypeBody, TypeDefinition,
};
use crate::base::{SourceLocation, is_reserved_name, is_valid_name, to_constant_case};
use crate::checker::LiteralValue;
use crate::hir::{
    DeclarationKind, DeclaredType, DiagnosticCollector, DirectiveDefinition, EnumMember,
    ExtractedTypes, FieldDefinition, OperationBinding, OperationKind, PrimitiveKind,
    ScalarDefinition, SemanticKind, SemanticType, TypeMetadata, TypePayload, codes,
};

/// Fallback name for a field type with no schema representation.
const PLACEHOLDER_TYPE: &str = "String";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Output,
    Input,
}

/// Convert extracted types and operations into schema definitions.
///
/// Anonymous shapes become synthesized types; a synthesized name that is
/// already taken is reported, never renamed.
pub fn convert_schema(
    extracted: &ExtractedTypes,
    operations: &[OperationBinding],
    diagnostics: &mut DiagnosticCollector,
) -> ConvertedSchema {
    let mut converter = Converter::new(extracted, diagnostics);

    let mut types: Vec<TypeDefinition> = extracted
        .scalars
        .iter()
        .map(|scalar| converter.convert_scalar(scalar))
        .collect();
    for declared in &extracted.types {
        types.push(converter.convert_declared(declared));
    }
    let mut directives: Vec<SchemaDirective> = extracted
        .directives
        .iter()
        .map(|directive| converter.convert_directive(directive))
        .collect();
    let mut operations: Vec<OperationField> = operations
        .iter()
        .map(|binding| converter.convert_operation(binding))
        .collect();

    debug!(
        "[CONVERT] {} declared, {} synthesized, {} operation fields",
        types.len(),
        converter.synthesized.len(),
        operations.len()
    );
    types.append(&mut converter.synthesized);
    types.sort_by(|a, b| a.name.cmp(&b.name));
    operations.sort_by(|a, b| (&a.target, &a.field.name).cmp(&(&b.target, &b.field.name)));
    coerce_defaults(&mut types, &mut directives, &mut operations, diagnostics);

    ConvertedSchema {
        types,
        directives,
        operations,
    }
}

struct Converter<'a> {
    diagnostics: &'a mut DiagnosticCollector,
    /// Every name in the type namespace, with what claimed it.
    taken: FxHashMap<SmolStr, String>,
    synthesized: Vec<TypeDefinition>,
}

impl<'a> Converter<'a> {
    fn new(extracted: &ExtractedTypes, diagnostics: &'a mut DiagnosticCollector) -> Self {
        let mut taken = FxHashMap::default();
        for declared in &extracted.types {
            taken.insert(
                declared.metadata.name.clone(),
                format!("declared type '{}'", declared.metadata.name),
            );
        }
        for scalar in &extracted.scalars {
            taken.insert(scalar.name.clone(), format!("scalar '{}'", scalar.name));
        }
        Self {
            diagnostics,
            taken,
            synthesized: Vec::new(),
        }
    }

    fn convert_scalar(&mut self, scalar: &ScalarDefinition) -> TypeDefinition {
        TypeDefinition {
            name: scalar.name.clone(),
            description: scalar.description.clone(),
            directives: Vec::new(),
            location: scalar.location.clone(),
            body: TypeBody::Scalar { only: scalar.only },
        }
    }

    fn convert_declared(&mut self, declared: &DeclaredType) -> TypeDefinition {
        let metadata = &declared.metadata;
        let name = metadata.name.as_str();
        debug!("[CONVERT] {} '{}'", metadata.kind.display(), name);

        let body = match (&declared.payload, metadata.kind) {
            (TypePayload::Fields(fields), DeclarationKind::Object) if is_input_name(name) => {
                let scope = InlineScope::input(name);
                TypeBody::Input {
                    fields: self.input_values(fields, &scope, name),
                }
            }
            (TypePayload::Fields(fields), DeclarationKind::Interface) => TypeBody::Interface {
                fields: self.output_fields(fields, &InlineScope::object(name), name),
                interfaces: sorted_names(&metadata.implements),
            },
            (TypePayload::Fields(fields), _) => TypeBody::Object {
                fields: self.output_fields(fields, &InlineScope::object(name), name),
                interfaces: sorted_names(&metadata.implements),
            },
            (TypePayload::EnumMembers(members), _) => TypeBody::Enum {
                values: self.enum_values(metadata, members),
            },
            (TypePayload::UnionMembers(members), _) => TypeBody::Union {
                members: sorted_names(members),
            },
        };

        TypeDefinition {
            name: metadata.name.clone(),
            description: type_description(metadata),
            directives: metadata.directives.clone(),
            location: Some(metadata.location.clone()),
            body,
        }
    }

    fn convert_directive(&mut self, directive: &DirectiveDefinition) -> SchemaDirective {
        let owner = format!("@{}", directive.name);
        let scope = InlineScope::directive(&directive.name);
        SchemaDirective {
            name: directive.name.clone(),
            description: directive.description.clone(),
            arguments: self.input_values(&directive.arguments, &scope, &owner),
            locations: directive.locations.clone(),
            location: directive.location.clone(),
        }
    }

    fn convert_operation(&mut self, binding: &OperationBinding) -> OperationField {
        let prefix = match binding.kind {
            OperationKind::Field => Some(binding.target.as_str()),
            _ => None,
        };
        let owner = format!("{}.{}", binding.target, binding.field_name);
        let location = Some(binding.location.clone());

        let arguments = self.input_values(
            &binding.arguments,
            &InlineScope::arguments(prefix, &binding.field_name),
            &owner,
        );
        let ty = self.field_type(
            &binding.return_type,
            binding.return_type.nullable,
            &InlineScope::payload(prefix, &binding.field_name),
            &owner,
            Side::Output,
            &location,
        );

        OperationField {
            kind: binding.kind,
            target: binding.target.clone(),
            parent: binding.parent.clone(),
            style: binding.style,
            field: SchemaField {
                name: binding.field_name.clone(),
                ty,
                arguments,
                description: binding.description.clone(),
                deprecation: binding.deprecation.clone(),
                directives: binding.directives.clone(),
                location,
            },
            implementation: binding.implementation.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Fields
    // ------------------------------------------------------------------

    fn output_fields(
        &mut self,
        fields: &[FieldDefinition],
        scope: &InlineScope,
        owner: &str,
    ) -> Vec<SchemaField> {
        let mut converted: Vec<SchemaField> = fields
            .iter()
            .map(|field| {
                let ty = self.field_type(
                    &field.ty,
                    field.is_nullable(),
                    &scope.child(&field.name),
                    owner,
                    Side::Output,
                    &field.location,
                );
                SchemaField {
                    name: field.name.clone(),
                    ty,
                    arguments: Vec::new(),
                    description: field.description.clone(),
                    deprecation: field.deprecation.clone(),
                    directives: field.directives.clone(),
                    location: field.location.clone(),
                }
            })
            .collect();
        converted.sort_by(|a, b| a.name.cmp(&b.name));
        converted
    }

    fn input_values(
        &mut self,
        fields: &[FieldDefinition],
        scope: &InlineScope,
        owner: &str,
    ) -> Vec<InputValue> {
        let mut converted: Vec<InputValue> = fields
            .iter()
            .map(|field| {
                let ty = self.field_type(
                    &field.ty,
                    field.is_nullable(),
                    &scope.child(&field.name),
                    owner,
                    Side::Input,
                    &field.location,
                );
                InputValue {
                    name: field.name.clone(),
                    ty,
                    description: field.description.clone(),
                    deprecation: field.deprecation.clone(),
                    directives: field.directives.clone(),
                    default_value: field.default_value.clone(),
                    location: field.location.clone(),
                }
            })
            .collect();
        converted.sort_by(|a, b| a.name.cmp(&b.name));
        converted
    }

    /// Map a semantic type to a field type; `scope` names an inline shape
    /// found here.
    fn field_type(
        &mut self,
        ty: &SemanticType,
        nullable: bool,
        scope: &InlineScope,
        owner: &str,
        side: Side,
        location: &Option<SourceLocation>,
    ) -> FieldType {
        match &ty.kind {
            SemanticKind::Primitive(kind) => FieldType::named(primitive_name(*kind), nullable),
            SemanticKind::Scalar { name, .. } | SemanticKind::Reference { name } => {
                FieldType::named(name.clone(), nullable)
            }
            SemanticKind::Literal(value) => FieldType::named(literal_scalar(value), nullable),
            SemanticKind::Array { element } => {
                let item = match &element.kind {
                    SemanticKind::Union { .. } => {
                        self.diagnostics.error(
                            codes::UNSUPPORTED_FIELD_TYPE,
                            format!(
                                "List items of '{}' have no schema type",
                                scope.describe(owner)
                            ),
                            location.clone(),
                        );
                        FieldType::named(PLACEHOLDER_TYPE, element.nullable)
                    }
                    _ => self.field_type(element, element.nullable, scope, owner, side, location),
                };
                FieldType::list(item, nullable)
            }
            SemanticKind::InlineObject { fields } => {
                let name = self.synthesize(fields, scope, owner, side, location);
                FieldType::named(name, nullable)
            }
            SemanticKind::Union { .. } => {
                self.diagnostics.warning(
                    codes::UNSUPPORTED_FIELD_TYPE,
                    format!(
                        "'{}' has no schema type and is emitted as '{}'",
                        scope.describe(owner),
                        PLACEHOLDER_TYPE
                    ),
                    location.clone(),
                );
                FieldType::named(PLACEHOLDER_TYPE, nullable)
            }
        }
    }

    /// Create a type for an anonymous shape and return its name.
    fn synthesize(
        &mut self,
        fields: &[FieldDefinition],
        scope: &InlineScope,
        owner: &str,
        side: Side,
        location: &Option<SourceLocation>,
    ) -> SmolStr {
        let name = SmolStr::new(scope.name());
        let path = scope.describe(owner);

        if let Some(previous) = self.taken.get(&name) {
            self.diagnostics.error(
                codes::INLINE_TYPE_NAME_COLLISION,
                format!(
                    "Inline type name '{}' for '{}' is already used by {}",
                    name, path, previous
                ),
                location.clone(),
            );
            return name;
        }
        self.taken
            .insert(name.clone(), format!("the inline type at '{}'", path));
        trace!("[CONVERT] synthesized '{}' for '{}'", name, path);

        let body = match side {
            Side::Output => TypeBody::Object {
                fields: self.output_fields(fields, scope, owner),
                interfaces: Vec::new(),
            },
            Side::Input => TypeBody::Input {
                fields: self.input_values(fields, scope, owner),
            },
        };
        self.synthesized.push(TypeDefinition {
            name: name.clone(),
            description: None,
            directives: Vec::new(),
            location: location.clone(),
            body,
        });
        name
    }

    // ------------------------------------------------------------------
    // Enums
    // ------------------------------------------------------------------

    fn enum_values(
        &mut self,
        metadata: &TypeMetadata,
        members: &[EnumMember],
    ) -> Vec<EnumValueDefinition> {
        let mut values: Vec<EnumValueDefinition> = Vec::with_capacity(members.len());
        let mut sources: FxHashMap<SmolStr, &str> = FxHashMap::default();

        for member in members {
            let name = SmolStr::new(to_constant_case(&member.name));
            let location = member
                .location
                .clone()
                .or_else(|| Some(metadata.location.clone()));
            if !is_valid_name(&name) || is_reserved_name(&name) {
                self.diagnostics.warning(
                    codes::INVALID_ENUM_VALUE,
                    format!(
                        "Enum '{}' member '{}' converts to '{}', which is not a valid enum value; it was excluded",
                        metadata.name, member.name, name
                    ),
                    location,
                );
                continue;
            }
            if let Some(first) = sources.get(&name) {
                self.diagnostics.error(
                    codes::DUPLICATE_ENUM_VALUE,
                    format!(
                        "Enum '{}' members '{}' and '{}' both convert to '{}'",
                        metadata.name, first, member.name, name
                    ),
                    location,
                );
                continue;
            }
            sources.insert(name.clone(), member.name.as_str());
            values.push(EnumValueDefinition {
                name,
                value: member.value.clone(),
                description: member.description.clone(),
                deprecation: member.deprecation.clone(),
                location,
            });
        }

        if values.is_empty() {
            self.diagnostics.error(
                codes::ALL_FIELDS_EXCLUDED,
                format!("Enum '{}' has no representable values", metadata.name),
                Some(metadata.location.clone()),
            );
        }
        values
    }
}

fn is_input_name(name: &str) -> bool {
    name.ends_with("Input")
}

fn primitive_name(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "Boolean",
        PrimitiveKind::Number => "Float",
        PrimitiveKind::String => "String",
    }
}

/// Scalar a literal-typed field widens to.
fn literal_scalar(value: &LiteralValue) -> &'static str {
    match value {
        LiteralValue::Boolean(_) => "Boolean",
        LiteralValue::Number(_) => "Float",
        _ => "String",
    }
}

fn sorted_names(names: &[SmolStr]) -> Vec<SmolStr> {
    let mut names = names.to_vec();
    names.sort();
    names.dedup();
    names
}

/// Description with a type-level deprecation note appended.
fn type_description(metadata: &TypeMetadata) -> Option<String> {
    let Some(deprecation) = &metadata.deprecation else {
        return metadata.description.clone();
    };
    let note = match &deprecation.reason {
        Some(reason) => format!("Deprecated: {}", reason),
        None => "Deprecated".to_string(),
    };
    Some(match &metadata.description {
        Some(description) => format!("{}\n\n{}", description, note),
        None => note,
    })
}
