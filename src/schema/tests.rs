#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use smol_str::SmolStr;

use super::{FieldType, TypeBody, TypeDefinition, convert_schema};
use crate::base::SourceLocation;
use crate::checker::LiteralValue;
use crate::hir::{
    AuthoringStyle, DeclarationKind, DeclaredType, Deprecation, DiagnosticCollector, EnumMember,
    ExtractedTypes, FieldDefinition, ImplementationRef, OperationBinding, OperationKind,
    PrimitiveKind, ScalarDefinition, SemanticKind, SemanticType, TypeMetadata, TypePayload, codes,
};

fn loc(line: u32) -> SourceLocation {
    SourceLocation::new("src/schema/types.ts", line, 1)
}

fn metadata(name: &str, kind: DeclarationKind) -> TypeMetadata {
    TypeMetadata {
        name: name.into(),
        kind,
        location: loc(1),
        description: None,
        deprecation: None,
        directives: Vec::new(),
        implements: Vec::new(),
    }
}

fn object(name: &str, fields: Vec<FieldDefinition>) -> DeclaredType {
    DeclaredType {
        metadata: metadata(name, DeclarationKind::Object),
        payload: TypePayload::Fields(fields),
    }
}

fn string() -> SemanticType {
    SemanticType::primitive(PrimitiveKind::String)
}

fn inline(fields: Vec<FieldDefinition>) -> SemanticType {
    SemanticType::new(SemanticKind::InlineObject { fields })
}

fn member(name: &str) -> EnumMember {
    EnumMember {
        name: name.to_string(),
        value: LiteralValue::String(name.to_string()),
        description: None,
        deprecation: None,
        location: None,
    }
}

fn query(field: &str, arguments: Vec<FieldDefinition>, return_type: SemanticType) -> OperationBinding {
    OperationBinding {
        kind: OperationKind::Query,
        field_name: field.into(),
        arguments,
        return_type,
        target: "Query".into(),
        parent: None,
        style: AuthoringStyle::Modern,
        implementation: ImplementationRef {
            module: "src/schema/resolvers.ts".into(),
            export: field.into(),
            property: None,
        },
        description: None,
        deprecation: None,
        directives: Vec::new(),
        location: loc(10),
    }
}

fn field_type<'a>(definition: &'a TypeDefinition, field: &str) -> &'a FieldType {
    &definition
        .fields()
        .iter()
        .find(|f| f.name == field)
        .unwrap()
        .ty
}

#[test]
fn test_primitives_and_lists() {
    let mut tags = FieldDefinition::new("tags", SemanticType::array(string().with_nullable(true)));
    tags.optional = true;
    let extracted = ExtractedTypes {
        types: vec![object(
            "User",
            vec![
                FieldDefinition::new("score", SemanticType::primitive(PrimitiveKind::Number)),
                FieldDefinition::new("active", SemanticType::primitive(PrimitiveKind::Boolean)),
                FieldDefinition::new("id", SemanticType::scalar("ID", None)),
                tags,
            ],
        )],
        ..ExtractedTypes::default()
    };
    let mut diagnostics = DiagnosticCollector::new();
    let schema = convert_schema(&extracted, &[], &mut diagnostics);
    assert!(!diagnostics.has_errors());

    let user = schema.get("User").unwrap();
    let names: Vec<&str> = user.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["active", "id", "score", "tags"]);
    assert_eq!(field_type(user, "score").to_string(), "Float!");
    assert_eq!(field_type(user, "active").to_string(), "Boolean!");
    assert_eq!(field_type(user, "id").to_string(), "ID!");
    assert_eq!(field_type(user, "tags").to_string(), "[String]");
}

#[test]
fn test_input_classification_by_suffix() {
    let extracted = ExtractedTypes {
        types: vec![object(
            "CreateUserInput",
            vec![FieldDefinition::new(
                "address",
                inline(vec![FieldDefinition::new("city", string())]),
            )],
        )],
        ..ExtractedTypes::default()
    };
    let mut diagnostics = DiagnosticCollector::new();
    let schema = convert_schema(&extracted, &[], &mut diagnostics);

    let input = schema.get("CreateUserInput").unwrap();
    assert!(matches!(input.body, TypeBody::Input { .. }));
    let address = schema.get("CreateUserAddressInput").unwrap();
    assert_eq!(address.kind_name(), "input object");
}

#[test]
fn test_nested_inline_objects_are_named_by_path() {
    let address = inline(vec![FieldDefinition::new("city", string())]);
    let profile = inline(vec![FieldDefinition::new("address", address)]);
    let extracted = ExtractedTypes {
        types: vec![object("User", vec![FieldDefinition::new("profile", profile)])],
        ..ExtractedTypes::default()
    };
    let mut diagnostics = DiagnosticCollector::new();
    let schema = convert_schema(&extracted, &[], &mut diagnostics);
    assert!(!diagnostics.has_errors());

    let names: Vec<&str> = schema.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["User", "UserProfile", "UserProfileAddress"]);
    assert_eq!(
        field_type(schema.get("UserProfile").unwrap(), "address").to_string(),
        "UserProfileAddress!"
    );
}

#[test]
fn test_inline_name_collision_is_reported() {
    let details = || inline(vec![FieldDefinition::new("bio", string())]);
    let extracted = ExtractedTypes {
        types: vec![
            object("User", vec![FieldDefinition::new("profileDetails", details())]),
            object("UserProfile", vec![FieldDefinition::new("details", details())]),
        ],
        ..ExtractedTypes::default()
    };
    let mut diagnostics = DiagnosticCollector::new();
    let schema = convert_schema(&extracted, &[], &mut diagnostics);

    let collisions: Vec<_> = diagnostics
        .errors()
        .iter()
        .filter(|d| d.code == codes::INLINE_TYPE_NAME_COLLISION)
        .collect();
    assert_eq!(collisions.len(), 1);
    assert!(collisions[0].message.contains("User.profileDetails"));
    assert!(collisions[0].message.contains("UserProfile.details"));
    // Never renamed.
    assert!(schema.get("UserProfileDetails2").is_none());
    assert_eq!(
        schema
            .types
            .iter()
            .filter(|t| t.name == "UserProfileDetails")
            .count(),
        1
    );
}

#[test]
fn test_inline_name_colliding_with_declared_type() {
    let extracted = ExtractedTypes {
        types: vec![
            object(
                "User",
                vec![FieldDefinition::new(
                    "profile",
                    inline(vec![FieldDefinition::new("bio", string())]),
                )],
            ),
            object("UserProfile", vec![FieldDefinition::new("bio", string())]),
        ],
        ..ExtractedTypes::default()
    };
    let mut diagnostics = DiagnosticCollector::new();
    convert_schema(&extracted, &[], &mut diagnostics);

    let errors = diagnostics.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, codes::INLINE_TYPE_NAME_COLLISION);
    assert!(errors[0].message.contains("declared type 'UserProfile'"));
}

#[test]
fn test_enum_values_are_constant_cased() {
    let extracted = ExtractedTypes {
        types: vec![DeclaredType {
            metadata: metadata("Status", DeclarationKind::Enum),
            payload: TypePayload::EnumMembers(vec![
                member("active"),
                member("inReview"),
                member("__hidden"),
            ]),
        }],
        ..ExtractedTypes::default()
    };
    let mut diagnostics = DiagnosticCollector::new();
    let schema = convert_schema(&extracted, &[], &mut diagnostics);

    let TypeBody::Enum { values } = &schema.get("Status").unwrap().body else {
        panic!("expected enum");
    };
    let names: Vec<&str> = values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["ACTIVE", "IN_REVIEW"]);
    assert_eq!(values[1].value, LiteralValue::String("inReview".into()));
    assert_eq!(diagnostics.warnings()[0].code, codes::INVALID_ENUM_VALUE);
}

#[test]
fn test_enum_value_duplicates_and_empty_enum() {
    let extracted = ExtractedTypes {
        types: vec![
            DeclaredType {
                metadata: metadata("Mode", DeclarationKind::Enum),
                payload: TypePayload::EnumMembers(vec![member("darkMode"), member("DARK_MODE")]),
            },
            DeclaredType {
                metadata: metadata("Nothing", DeclarationKind::Enum),
                payload: TypePayload::EnumMembers(vec![member("__a")]),
            },
        ],
        ..ExtractedTypes::default()
    };
    let mut diagnostics = DiagnosticCollector::new();
    convert_schema(&extracted, &[], &mut diagnostics);

    let found: Vec<&str> = diagnostics.errors().iter().map(|d| d.code).collect();
    assert_eq!(
        found,
        vec![codes::DUPLICATE_ENUM_VALUE, codes::ALL_FIELDS_EXCLUDED]
    );
}

#[test]
fn test_type_deprecation_folds_into_description() {
    let mut user = object("User", vec![FieldDefinition::new("name", string())]);
    user.metadata.description = Some("A person.".into());
    user.metadata.deprecation = Some(Deprecation {
        reason: Some("Use Account".into()),
    });
    let extracted = ExtractedTypes {
        types: vec![user],
        ..ExtractedTypes::default()
    };
    let mut diagnostics = DiagnosticCollector::new();
    let schema = convert_schema(&extracted, &[], &mut diagnostics);
    assert_eq!(
        schema.get("User").unwrap().description.as_deref(),
        Some("A person.\n\nDeprecated: Use Account")
    );
}

#[test]
fn test_operation_arguments_and_payload_names() {
    let filter = FieldDefinition::new("filter", inline(vec![FieldDefinition::new("q", string())]));
    let payload = inline(vec![FieldDefinition::new(
        "meta",
        inline(vec![FieldDefinition::new("ok", SemanticType::primitive(PrimitiveKind::Boolean))]),
    )]);
    let mut diagnostics = DiagnosticCollector::new();
    let schema = convert_schema(
        &ExtractedTypes::default(),
        &[query("search", vec![filter], payload)],
        &mut diagnostics,
    );
    assert!(!diagnostics.has_errors());

    let names: Vec<&str> = schema.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["SearchFilterInput", "SearchPayload", "SearchPayloadMeta"]
    );
    let search = &schema.operations[0];
    assert_eq!(search.field.ty.to_string(), "SearchPayload!");
    assert_eq!(search.field.arguments[0].ty.to_string(), "SearchFilterInput!");
}

#[test]
fn test_field_resolver_inline_names_use_parent() {
    let mut binding = query(
        "stats",
        Vec::new(),
        inline(vec![FieldDefinition::new("count", SemanticType::primitive(PrimitiveKind::Number))]),
    );
    binding.kind = OperationKind::Field;
    binding.target = "User".into();
    binding.parent = Some("User".into());
    let mut diagnostics = DiagnosticCollector::new();
    let schema = convert_schema(&ExtractedTypes::default(), &[binding], &mut diagnostics);
    assert!(schema.get("UserStatsPayload").is_some());
}

#[test]
fn test_scalars_are_emitted() {
    let extracted = ExtractedTypes {
        scalars: vec![ScalarDefinition {
            name: SmolStr::new("DateTime"),
            only: None,
            description: Some("ISO-8601 timestamp".into()),
            location: None,
        }],
        ..ExtractedTypes::default()
    };
    let mut diagnostics = DiagnosticCollector::new();
    let schema = convert_schema(&extracted, &[], &mut diagnostics);
    let scalar = schema.get("DateTime").unwrap();
    assert_eq!(scalar.kind_name(), "scalar");
    assert_eq!(scalar.description.as_deref(), Some("ISO-8601 timestamp"));
}

#[test]
fn test_union_field_falls_back_with_warning() {
    let union = SemanticType::new(SemanticKind::Union {
        members: vec![string(), SemanticType::primitive(PrimitiveKind::Number)],
    });
    let extracted = ExtractedTypes {
        types: vec![object("Cell", vec![FieldDefinition::new("value", union.clone())])],
        ..ExtractedTypes::default()
    };
    let mut diagnostics = DiagnosticCollector::new();
    let schema = convert_schema(&extracted, &[], &mut diagnostics);
    assert_eq!(
        field_type(schema.get("Cell").unwrap(), "value").to_string(),
        "String!"
    );
    assert_eq!(diagnostics.warnings()[0].code, codes::UNSUPPORTED_FIELD_TYPE);

    let extracted = ExtractedTypes {
        types: vec![object("Row", vec![FieldDefinition::new("cells", SemanticType::array(union))])],
        ..ExtractedTypes::default()
    };
    let mut diagnostics = DiagnosticCollector::new();
    convert_schema(&extracted, &[], &mut diagnostics);
    assert_eq!(diagnostics.errors()[0].code, codes::UNSUPPORTED_FIELD_TYPE);
}
