//! Interface implementation checks.

use super::SchemaChecker;
use crate::hir::codes;
use crate::schema::{FieldType, SchemaField, TypeDefinition, TypeShape};

impl<'a> SchemaChecker<'a> {
    pub(super) fn check_interfaces(&mut self) {
        let schema = self.schema;
        for definition in schema.types.iter().filter(|t| t.is_extensible()) {
            for name in definition.interfaces() {
                let Some(interface) = self.lookup(name) else {
                    self.diagnostics.error(
                        codes::IMPLEMENTS_NON_INTERFACE,
                        format!(
                            "Type '{}' implements '{}', which is not declared",
                            definition.name, name
                        ),
                        definition.location.clone(),
                    );
                    continue;
                };
                if !interface.is_interface() {
                    self.diagnostics.error(
                        codes::IMPLEMENTS_NON_INTERFACE,
                        format!(
                            "Type '{}' implements '{}', which is {} {}, not an interface",
                            definition.name,
                            name,
                            article(interface.kind_name()),
                            interface.kind_name()
                        ),
                        definition.location.clone(),
                    );
                    continue;
                }
                self.check_implementation(definition, interface);
                for inherited in interface.interfaces() {
                    if !definition.interfaces().contains(inherited) {
                        self.diagnostics.error(
                            codes::MISSING_TRANSITIVE_INTERFACE,
                            format!(
                                "Type '{}' must also implement '{}', which is implemented by '{}'",
                                definition.name, inherited, name
                            ),
                            definition.location.clone(),
                        );
                    }
                }
            }
        }
    }

    fn check_implementation(&mut self, definition: &'a TypeDefinition, interface: &'a TypeDefinition) {
        let fields = self.fields_of(definition);
        for expected in self.fields_of(interface) {
            let Some(field) = fields.iter().find(|f| f.name == expected.name) else {
                self.diagnostics.error(
                    codes::INTERFACE_MISSING_FIELD,
                    format!(
                        "Type '{}' is missing field '{}' required by interface '{}'",
                        definition.name, expected.name, interface.name
                    ),
                    definition.location.clone(),
                );
                continue;
            };
            if !self.is_subtype(&field.ty, &expected.ty) {
                self.diagnostics.error(
                    codes::INTERFACE_FIELD_TYPE_MISMATCH,
                    format!(
                        "Field '{}.{}' has type '{}', which is not compatible with '{}' on interface '{}'",
                        definition.name, field.name, field.ty, expected.ty, interface.name
                    ),
                    field.location.clone().or_else(|| definition.location.clone()),
                );
            }
            self.check_arguments(definition, interface, field, expected);
        }
    }

    fn check_arguments(
        &mut self,
        definition: &TypeDefinition,
        interface: &TypeDefinition,
        field: &SchemaField,
        expected: &SchemaField,
    ) {
        let location = field.location.clone().or_else(|| definition.location.clone());
        for argument in &expected.arguments {
            match field.arguments.iter().find(|a| a.name == argument.name) {
                None => self.diagnostics.error(
                    codes::INTERFACE_ARGUMENT_MISMATCH,
                    format!(
                        "Field '{}.{}' is missing argument '{}' required by interface '{}'",
                        definition.name, field.name, argument.name, interface.name
                    ),
                    location.clone(),
                ),
                Some(actual) if actual.ty != argument.ty => self.diagnostics.error(
                    codes::INTERFACE_ARGUMENT_MISMATCH,
                    format!(
                        "Argument '{}.{}({})' has type '{}', but interface '{}' declares '{}'",
                        definition.name,
                        field.name,
                        argument.name,
                        actual.ty,
                        interface.name,
                        argument.ty
                    ),
                    location.clone(),
                ),
                Some(_) => {}
            }
        }
        for extra in &field.arguments {
            let declared = expected.arguments.iter().any(|a| a.name == extra.name);
            if !declared && !extra.ty.nullable && extra.default_value.is_none() {
                self.diagnostics.error(
                    codes::INTERFACE_ARGUMENT_MISMATCH,
                    format!(
                        "Argument '{}.{}({})' is required but not declared by interface '{}'",
                        definition.name, field.name, extra.name, interface.name
                    ),
                    location.clone(),
                );
            }
        }
    }

    /// A field of type `actual` may stand in for one of type `expected`.
    pub(super) fn is_subtype(&self, actual: &FieldType, expected: &FieldType) -> bool {
        if actual.nullable && !expected.nullable {
            return false;
        }
        match (&actual.shape, &expected.shape) {
            (TypeShape::List(a), TypeShape::List(b)) => self.is_subtype(a, b),
            (TypeShape::Named(a), TypeShape::Named(b)) => a == b || self.is_possible_type(b, a),
            _ => false,
        }
    }
}

fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}
