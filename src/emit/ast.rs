//! JSON document shaped like a GraphQL `DocumentNode`.

use serde_json::{Value, json};

use crate::checker::LiteralValue;
use crate::hir::{Deprecation, DirectiveApplication};
use crate::integrate::{SchemaDocument, TypeExtension};
use crate::schema::{
    EnumValueDefinition, FieldType, InputValue, SchemaDirective, SchemaField, TypeBody,
    TypeDefinition, TypeShape,
};

/// Build the `Document` node for a schema document.
///
/// Definitions follow the same order as the SDL text.
pub fn document_ast(document: &SchemaDocument) -> Value {
    let definitions: Vec<Value> = document
        .directives
        .iter()
        .map(directive_definition)
        .chain(document.types.iter().map(type_definition))
        .chain(document.extensions.iter().map(type_extension))
        .collect();
    json!({
        "kind": "Document",
        "definitions": definitions,
    })
}

fn name(value: &str) -> Value {
    json!({ "kind": "Name", "value": value })
}

fn description(text: Option<&str>) -> Value {
    match text {
        Some(text) => json!({ "kind": "StringValue", "value": text, "block": true }),
        None => Value::Null,
    }
}

fn type_reference(ty: &FieldType) -> Value {
    let inner = match &ty.shape {
        TypeShape::Named(named) => json!({ "kind": "NamedType", "name": name(named) }),
        TypeShape::List(item) => json!({ "kind": "ListType", "type": type_reference(item) }),
    };
    if ty.nullable {
        inner
    } else {
        json!({ "kind": "NonNullType", "type": inner })
    }
}

fn named_types<S: AsRef<str>>(names: &[S]) -> Vec<Value> {
    names
        .iter()
        .map(|n| json!({ "kind": "NamedType", "name": name(n.as_ref()) }))
        .collect()
}

fn value_node(value: &LiteralValue) -> Value {
    match value {
        LiteralValue::Null => json!({ "kind": "NullValue" }),
        LiteralValue::Boolean(b) => json!({ "kind": "BooleanValue", "value": b }),
        LiteralValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
            json!({ "kind": "IntValue", "value": value.to_string() })
        }
        LiteralValue::Number(_) => json!({ "kind": "FloatValue", "value": value.to_string() }),
        LiteralValue::String(s) => json!({ "kind": "StringValue", "value": s, "block": false }),
        LiteralValue::Enum(name) => json!({ "kind": "EnumValue", "value": name }),
        LiteralValue::List(items) => {
            let values: Vec<Value> = items.iter().map(value_node).collect();
            json!({ "kind": "ListValue", "values": values })
        }
        LiteralValue::Object(entries) => {
            let fields: Vec<Value> = entries
                .iter()
                .map(|(key, value)| {
                    json!({ "kind": "ObjectField", "name": name(key), "value": value_node(value) })
                })
                .collect();
            json!({ "kind": "ObjectValue", "fields": fields })
        }
    }
}

fn directives(applied: &[DirectiveApplication], deprecation: Option<&Deprecation>) -> Vec<Value> {
    let mut nodes = Vec::with_capacity(applied.len() + 1);
    if let Some(deprecation) = deprecation {
        let arguments: Vec<Value> = deprecation
            .reason
            .iter()
            .map(|reason| {
                json!({
                    "kind": "Argument",
                    "name": name("reason"),
                    "value": value_node(&LiteralValue::String(reason.clone())),
                })
            })
            .collect();
        nodes.push(json!({ "kind": "Directive", "name": name("deprecated"), "arguments": arguments }));
    }
    for directive in applied {
        let arguments: Vec<Value> = directive
            .arguments
            .iter()
            .map(|(arg, value)| {
                json!({ "kind": "Argument", "name": name(arg), "value": value_node(value) })
            })
            .collect();
        nodes.push(json!({ "kind": "Directive", "name": name(&directive.name), "arguments": arguments }));
    }
    nodes
}

fn input_value(value: &InputValue) -> Value {
    json!({
        "kind": "InputValueDefinition",
        "description": description(value.description.as_deref()),
        "name": name(&value.name),
        "type": type_reference(&value.ty),
        "defaultValue": value.default_value.as_ref().map(value_node),
        "directives": directives(&value.directives, value.deprecation.as_ref()),
    })
}

fn field(field: &SchemaField) -> Value {
    let arguments: Vec<Value> = field.arguments.iter().map(input_value).collect();
    json!({
        "kind": "FieldDefinition",
        "description": description(field.description.as_deref()),
        "name": name(&field.name),
        "arguments": arguments,
        "type": type_reference(&field.ty),
        "directives": directives(&field.directives, field.deprecation.as_ref()),
    })
}

fn enum_value(value: &EnumValueDefinition) -> Value {
    json!({
        "kind": "EnumValueDefinition",
        "description": description(value.description.as_deref()),
        "name": name(&value.name),
        "directives": directives(&[], value.deprecation.as_ref()),
    })
}

fn directive_definition(directive: &SchemaDirective) -> Value {
    let arguments: Vec<Value> = directive.arguments.iter().map(input_value).collect();
    let locations: Vec<Value> = directive.locations.iter().map(|l| name(l.as_str())).collect();
    json!({
        "kind": "DirectiveDefinition",
        "description": description(directive.description.as_deref()),
        "name": name(&directive.name),
        "arguments": arguments,
        "repeatable": false,
        "locations": locations,
    })
}

fn type_definition(definition: &TypeDefinition) -> Value {
    let mut node = json!({
        "description": description(definition.description.as_deref()),
        "name": name(&definition.name),
        "directives": directives(&definition.directives, None),
    });
    let (kind, extra) = match &definition.body {
        TypeBody::Object { fields, interfaces } => (
            "ObjectTypeDefinition",
            json!({
                "interfaces": named_types(interfaces),
                "fields": fields.iter().map(field).collect::<Vec<_>>(),
            }),
        ),
        TypeBody::Interface { fields, interfaces } => (
            "InterfaceTypeDefinition",
            json!({
                "interfaces": named_types(interfaces),
                "fields": fields.iter().map(field).collect::<Vec<_>>(),
            }),
        ),
        TypeBody::Input { fields } => (
            "InputObjectTypeDefinition",
            json!({ "fields": fields.iter().map(input_value).collect::<Vec<_>>() }),
        ),
        TypeBody::Union { members } => ("UnionTypeDefinition", json!({ "types": named_types(members) })),
        TypeBody::Enum { values } => (
            "EnumTypeDefinition",
            json!({ "values": values.iter().map(enum_value).collect::<Vec<_>>() }),
        ),
        TypeBody::Scalar { .. } => ("ScalarTypeDefinition", json!({})),
    };
    merge(&mut node, kind, extra);
    node
}

fn type_extension(extension: &TypeExtension) -> Value {
    json!({
        "kind": "ObjectTypeExtension",
        "name": name(&extension.target),
        "interfaces": [],
        "directives": [],
        "fields": extension.fields.iter().map(field).collect::<Vec<_>>(),
    })
}

fn merge(node: &mut Value, kind: &str, extra: Value) {
    if let (Value::Object(target), Value::Object(source)) = (node, extra) {
        target.insert("kind".to_string(), Value::String(kind.to_string()));
        target.extend(source);
    }
}
