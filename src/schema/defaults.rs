//! Default value coercion.
//!
//! Defaults arrive as the literal written in the declaration. Once every
//! type is converted they are checked against the field type, and enum
//! defaults are rewritten from the member's source value to its schema name.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use super::types::{
    FieldType, InputValue, OperationField, SchemaDirective, TypeBody, TypeDefinition, TypeShape,
};
use crate::checker::LiteralValue;
use crate::hir::{DiagnosticCollector, codes};

/// What a default can be checked against, per named type.
enum Target {
    /// `(source value, schema name)` per member.
    Enum(Vec<(LiteralValue, SmolStr)>),
    Input(Vec<InputSlot>),
}

struct InputSlot {
    name: SmolStr,
    ty: FieldType,
    has_default: bool,
}

/// Check and rewrite every default value in the converted schema.
///
/// A default that does not fit its type is reported as
/// `INVALID_DEFAULT_VALUE` and dropped.
pub(super) fn coerce_defaults(
    types: &mut [TypeDefinition],
    directives: &mut [SchemaDirective],
    operations: &mut [OperationField],
    diagnostics: &mut DiagnosticCollector,
) {
    let mut coercer = DefaultCoercer {
        targets: targets(types),
        diagnostics,
    };
    for TypeDefinition { name, body, .. } in types.iter_mut() {
        match body {
            TypeBody::Input { fields } => coercer.coerce_all(name, fields, false),
            TypeBody::Object { fields, .. } | TypeBody::Interface { fields, .. } => {
                for field in fields {
                    let owner = format!("{}.{}", name, field.name);
                    coercer.coerce_all(&owner, &mut field.arguments, true);
                }
            }
            _ => {}
        }
    }
    for operation in operations {
        let owner = format!("{}.{}", operation.target, operation.field.name);
        coercer.coerce_all(&owner, &mut operation.field.arguments, true);
    }
    for directive in directives {
        let owner = format!("@{}", directive.name);
        coercer.coerce_all(&owner, &mut directive.arguments, true);
    }
}

fn targets(types: &[TypeDefinition]) -> FxHashMap<SmolStr, Target> {
    types
        .iter()
        .filter_map(|definition| {
            let target = match &definition.body {
                TypeBody::Enum { values } => Target::Enum(
                    values
                        .iter()
                        .map(|v| (v.value.clone(), v.name.clone()))
                        .collect(),
                ),
                TypeBody::Input { fields } => Target::Input(
                    fields
                        .iter()
                        .map(|f| InputSlot {
                            name: f.name.clone(),
                            ty: f.ty.clone(),
                            has_default: f.default_value.is_some(),
                        })
                        .collect(),
                ),
                _ => return None,
            };
            Some((definition.name.clone(), target))
        })
        .collect()
}

struct DefaultCoercer<'d> {
    targets: FxHashMap<SmolStr, Target>,
    diagnostics: &'d mut DiagnosticCollector,
}

impl DefaultCoercer<'_> {
    fn coerce_all(&mut self, owner: &str, values: &mut [InputValue], arguments: bool) {
        for value in values {
            let Some(default) = value.default_value.take() else {
                continue;
            };
            match self.coerce(&default, &value.ty) {
                Ok(coerced) => {
                    trace!("[CONVERT] default {} -> {}", default, coerced);
                    value.default_value = Some(coerced);
                }
                Err(reason) => {
                    let site = if arguments {
                        format!("{}({})", owner, value.name)
                    } else {
                        format!("{}.{}", owner, value.name)
                    };
                    self.diagnostics.error(
                        codes::INVALID_DEFAULT_VALUE,
                        format!(
                            "Default value {} of '{}' does not fit type '{}': {}",
                            default, site, value.ty, reason
                        ),
                        value.location.clone(),
                    );
                }
            }
        }
    }

    fn coerce(&self, value: &LiteralValue, ty: &FieldType) -> Result<LiteralValue, String> {
        if *value == LiteralValue::Null {
            return if ty.nullable {
                Ok(LiteralValue::Null)
            } else {
                Err("null is not allowed for a non-null type".to_string())
            };
        }
        match &ty.shape {
            TypeShape::List(item) => match value {
                LiteralValue::List(items) => items
                    .iter()
                    .map(|i| self.coerce(i, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(LiteralValue::List),
                single => self.coerce(single, item),
            },
            TypeShape::Named(name) => self.coerce_named(value, name),
        }
    }

    fn coerce_named(&self, value: &LiteralValue, name: &str) -> Result<LiteralValue, String> {
        match (name, value) {
            ("String" | "ID", LiteralValue::String(_))
            | ("Boolean", LiteralValue::Boolean(_))
            | ("Float", LiteralValue::Number(_)) => Ok(value.clone()),
            ("Int" | "ID", LiteralValue::Number(n)) if is_int(*n) => Ok(value.clone()),
            ("String" | "ID" | "Boolean" | "Float" | "Int", _) => {
                Err(format!("expected {}, found {}", name, value.kind_name()))
            }
            _ => match self.targets.get(name) {
                Some(Target::Enum(members)) => members
                    .iter()
                    .find(|(source, schema)| {
                        source == value || value.as_str() == Some(schema.as_str())
                    })
                    .map(|(_, schema)| LiteralValue::Enum(schema.to_string()))
                    .ok_or_else(|| format!("{} is not a value of enum '{}'", value, name)),
                Some(Target::Input(slots)) => self.coerce_object(value, name, slots),
                // Custom scalars accept any literal; unknown names are a
                // validation error of their own.
                None => Ok(value.clone()),
            },
        }
    }

    fn coerce_object(
        &self,
        value: &LiteralValue,
        name: &str,
        slots: &[InputSlot],
    ) -> Result<LiteralValue, String> {
        let LiteralValue::Object(entries) = value else {
            return Err(format!(
                "expected an object for input '{}', found {}",
                name,
                value.kind_name()
            ));
        };
        let mut coerced = Vec::with_capacity(entries.len());
        for (key, entry) in entries {
            let slot = slots
                .iter()
                .find(|s| s.name.as_str() == key.as_str())
                .ok_or_else(|| format!("input '{}' has no field '{}'", name, key))?;
            coerced.push((key.clone(), self.coerce(entry, &slot.ty)?));
        }
        let missing = slots.iter().find(|s| {
            !s.ty.nullable
                && !s.has_default
                && !entries.iter().any(|(k, _)| k.as_str() == s.name.as_str())
        });
        if let Some(slot) = missing {
            return Err(format!(
                "required field '{}' of input '{}' is missing",
                slot.name, name
            ));
        }
        Ok(LiteralValue::Object(coerced))
    }
}

fn is_int(n: f64) -> bool {
    n.fract() == 0.0 && n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EnumValueDefinition;
    use rstest::rstest;

    fn input_value(name: &str, ty: FieldType, default: LiteralValue) -> InputValue {
        InputValue {
            name: name.into(),
            ty,
            description: None,
            deprecation: None,
            directives: Vec::new(),
            default_value: Some(default),
            location: None,
        }
    }

    fn definition(name: &str, body: TypeBody) -> TypeDefinition {
        TypeDefinition {
            name: name.into(),
            description: None,
            directives: Vec::new(),
            location: None,
            body,
        }
    }

    fn status() -> TypeDefinition {
        let value = |name: &str, source: &str| EnumValueDefinition {
            name: name.into(),
            value: LiteralValue::String(source.into()),
            description: None,
            deprecation: None,
            location: None,
        };
        definition(
            "Status",
            TypeBody::Enum {
                values: vec![value("ACTIVE", "active"), value("IN_PROGRESS", "in-progress")],
            },
        )
    }

    /// Coerce one input field default on `FilterInput`.
    fn coerce_one(
        ty: FieldType,
        default: LiteralValue,
    ) -> (Option<LiteralValue>, DiagnosticCollector) {
        let mut types = vec![
            status(),
            definition(
                "FilterInput",
                TypeBody::Input {
                    fields: vec![input_value("value", ty, default)],
                },
            ),
        ];
        let mut diagnostics = DiagnosticCollector::new();
        coerce_defaults(&mut types, &mut [], &mut [], &mut diagnostics);
        let TypeBody::Input { fields } = &types[1].body else {
            unreachable!()
        };
        (fields[0].default_value.clone(), diagnostics)
    }

    #[test]
    fn test_enum_default_uses_schema_name() {
        let (default, diagnostics) = coerce_one(
            FieldType::named("Status", true),
            LiteralValue::String("in-progress".into()),
        );
        assert!(!diagnostics.has_errors());
        assert_eq!(default, Some(LiteralValue::Enum("IN_PROGRESS".into())));
    }

    #[test]
    fn test_enum_list_default() {
        let (default, _) = coerce_one(
            FieldType::list(FieldType::named("Status", false), true),
            LiteralValue::List(vec![LiteralValue::String("active".into())]),
        );
        assert_eq!(
            default,
            Some(LiteralValue::List(vec![LiteralValue::Enum("ACTIVE".into())]))
        );
    }

    #[rstest]
    #[case::unknown_member(FieldType::named("Status", true), LiteralValue::String("gone".into()))]
    #[case::string_for_int(FieldType::named("Int", true), LiteralValue::String("3".into()))]
    #[case::fraction_for_int(FieldType::named("Int", true), LiteralValue::Number(1.5))]
    #[case::null_for_non_null(FieldType::named("String", false), LiteralValue::Null)]
    #[case::number_for_boolean(FieldType::named("Boolean", true), LiteralValue::Number(1.0))]
    fn test_mismatched_default_is_reported(#[case] ty: FieldType, #[case] default: LiteralValue) {
        let (kept, diagnostics) = coerce_one(ty, default);
        assert_eq!(kept, None);
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(diagnostics.errors()[0].code, codes::INVALID_DEFAULT_VALUE);
        assert!(diagnostics.errors()[0].message.contains("'FilterInput.value'"));
    }

    #[rstest]
    #[case::int(FieldType::named("Int", false), LiteralValue::Number(20.0))]
    #[case::id_number(FieldType::named("ID", true), LiteralValue::Number(7.0))]
    #[case::float(FieldType::named("Float", true), LiteralValue::Number(0.5))]
    #[case::nullable_null(FieldType::named("String", true), LiteralValue::Null)]
    #[case::custom_scalar(FieldType::named("DateTime", true), LiteralValue::String("2024-01-01".into()))]
    fn test_matching_default_is_kept(#[case] ty: FieldType, #[case] default: LiteralValue) {
        let (kept, diagnostics) = coerce_one(ty, default.clone());
        assert!(!diagnostics.has_errors());
        assert_eq!(kept, Some(default));
    }

    #[test]
    fn test_input_object_default() {
        let mut types = vec![
            status(),
            definition(
                "RangeInput",
                TypeBody::Input {
                    fields: vec![InputValue {
                        default_value: None,
                        ..input_value("min", FieldType::named("Int", false), LiteralValue::Null)
                    }],
                },
            ),
            definition(
                "FilterInput",
                TypeBody::Input {
                    fields: vec![
                        input_value(
                            "range",
                            FieldType::named("RangeInput", true),
                            LiteralValue::Object(vec![("min".into(), LiteralValue::Number(1.0))]),
                        ),
                        input_value(
                            "window",
                            FieldType::named("RangeInput", true),
                            LiteralValue::Object(Vec::new()),
                        ),
                    ],
                },
            ),
        ];
        let mut diagnostics = DiagnosticCollector::new();
        coerce_defaults(&mut types, &mut [], &mut [], &mut diagnostics);

        assert_eq!(diagnostics.error_count(), 1);
        let error = &diagnostics.errors()[0];
        assert!(error.message.contains("'FilterInput.window'"));
        assert!(error.message.contains("required field 'min'"));
    }
}
