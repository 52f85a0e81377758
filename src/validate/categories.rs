//! Input/output category checks.

use super::{SchemaChecker, is_builtin_scalar};
use crate::base::SourceLocation;
use crate::config::ScalarDirection;
use crate::hir::codes;
use crate::schema::{FieldType, InputValue, SchemaField, TypeBody};

impl<'a> SchemaChecker<'a> {
    pub(super) fn check_categories(&mut self) {
        let schema = self.schema;
        for definition in &schema.types {
            match &definition.body {
                TypeBody::Input { fields } => {
                    for field in fields {
                        self.check_input_position(
                            &field.ty,
                            &format!("{}.{}", definition.name, field.name),
                            field.location.as_ref().or(definition.location.as_ref()),
                        );
                    }
                }
                TypeBody::Object { fields, .. } | TypeBody::Interface { fields, .. } => {
                    for field in fields {
                        self.check_output_field(&definition.name, field);
                    }
                }
                TypeBody::Union { members } => {
                    for member in members {
                        if self.lookup(member).is_some_and(|t| matches!(t.body, TypeBody::Object { .. })) {
                            continue;
                        }
                        self.diagnostics.error(
                            codes::INVALID_UNION_MEMBER,
                            format!(
                                "Union '{}' member '{}' must be an object type",
                                definition.name, member
                            ),
                            definition.location.clone(),
                        );
                    }
                }
                TypeBody::Enum { .. } | TypeBody::Scalar { .. } => {}
            }
        }
        for operation in &schema.operations {
            self.check_output_field(&operation.target, &operation.field);
        }
        for directive in &schema.directives {
            self.check_input_arguments(
                &format!("@{}", directive.name),
                &directive.arguments,
                Some(&directive.location),
            );
        }
    }

    fn check_output_field(&mut self, owner: &str, field: &SchemaField) {
        let site = format!("{}.{}", owner, field.name);
        let location = field.location.as_ref();
        let name = field.ty.named_type();
        if !is_builtin_scalar(name) {
            match self.lookup(name) {
                None => self.diagnostics.error(
                    codes::UNRESOLVED_REFERENCE,
                    format!("Field '{}' references unknown type '{}'", site, name),
                    location.cloned(),
                ),
                Some(definition) if !definition.is_output_type() => self.diagnostics.error(
                    codes::INPUT_TYPE_IN_OUTPUT,
                    format!(
                        "Field '{}' returns input type '{}'; only objects, interfaces, unions, enums and scalars may be used here",
                        site, name
                    ),
                    location.cloned(),
                ),
                Some(definition) => {
                    if let TypeBody::Scalar {
                        only: Some(ScalarDirection::Input),
                    } = definition.body
                    {
                        self.scalar_mismatch(name, ScalarDirection::Input, &site, location);
                    }
                }
            }
        }
        self.check_input_arguments(&site, &field.arguments, location);
    }

    fn check_input_arguments(
        &mut self,
        owner: &str,
        arguments: &[InputValue],
        fallback: Option<&SourceLocation>,
    ) {
        for argument in arguments {
            self.check_input_position(
                &argument.ty,
                &format!("{}({})", owner, argument.name),
                argument.location.as_ref().or(fallback),
            );
        }
    }

    fn check_input_position(&mut self, ty: &FieldType, site: &str, location: Option<&SourceLocation>) {
        let name = ty.named_type();
        if is_builtin_scalar(name) {
            return;
        }
        match self.lookup(name) {
            None => self.diagnostics.error(
                codes::UNKNOWN_ARGUMENT_TYPE,
                format!("'{}' references unknown type '{}'", site, name),
                location.cloned(),
            ),
            Some(definition) if !definition.is_input_type() => self.diagnostics.error(
                codes::OUTPUT_TYPE_IN_INPUT,
                format!(
                    "'{}' uses {} type '{}' in an input position; only scalars, enums and input objects are allowed",
                    site,
                    definition.kind_name(),
                    name
                ),
                location.cloned(),
            ),
            Some(definition) => {
                if let TypeBody::Scalar {
                    only: Some(ScalarDirection::Output),
                } = definition.body
                {
                    self.scalar_mismatch(name, ScalarDirection::Output, site, location);
                }
            }
        }
    }

    fn scalar_mismatch(
        &mut self,
        scalar: &str,
        only: ScalarDirection,
        site: &str,
        location: Option<&SourceLocation>,
    ) {
        let used = match only {
            ScalarDirection::Input => "output",
            ScalarDirection::Output => "input",
        };
        self.diagnostics.error(
            codes::SCALAR_DIRECTION_MISMATCH,
            format!(
                "Scalar '{}' is {}-only but '{}' uses it in an {} position",
                scalar,
                only.as_str(),
                site,
                used
            ),
            location.cloned(),
        );
    }
}
