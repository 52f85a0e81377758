//! Applied directive checks.

use super::SchemaChecker;
use crate::base::SourceLocation;
use crate::hir::{DirectiveApplication, DirectiveLocation, codes};
use crate::schema::{InputValue, SchemaField, TypeBody};

/// Directives every schema understands without a definition.
const BUILTIN_DIRECTIVES: [&str; 1] = ["deprecated"];

impl<'a> SchemaChecker<'a> {
    pub(super) fn check_directives(&mut self) {
        let schema = self.schema;
        for definition in &schema.types {
            for application in &definition.directives {
                self.check_application(
                    application,
                    definition.directive_location(),
                    &definition.name,
                    definition.location.as_ref(),
                );
            }
            match &definition.body {
                TypeBody::Object { fields, .. } | TypeBody::Interface { fields, .. } => {
                    for field in fields {
                        self.check_field_directives(&definition.name, field);
                    }
                }
                TypeBody::Input { fields } => {
                    self.check_input_value_directives(
                        &definition.name,
                        fields,
                        DirectiveLocation::InputFieldDefinition,
                    );
                }
                _ => {}
            }
        }
        for operation in &schema.operations {
            self.check_field_directives(&operation.target, &operation.field);
        }
        for directive in &schema.directives {
            self.check_input_value_directives(
                &format!("@{}", directive.name),
                &directive.arguments,
                DirectiveLocation::ArgumentDefinition,
            );
        }
    }

    fn check_field_directives(&mut self, owner: &str, field: &SchemaField) {
        let site = format!("{}.{}", owner, field.name);
        for application in &field.directives {
            self.check_application(
                application,
                DirectiveLocation::FieldDefinition,
                &site,
                field.location.as_ref(),
            );
        }
        self.check_input_value_directives(&site, &field.arguments, DirectiveLocation::ArgumentDefinition);
    }

    fn check_input_value_directives(
        &mut self,
        owner: &str,
        values: &[InputValue],
        kind: DirectiveLocation,
    ) {
        for value in values {
            let site = format!("{}.{}", owner, value.name);
            for application in &value.directives {
                self.check_application(application, kind, &site, value.location.as_ref());
            }
        }
    }

    fn check_application(
        &mut self,
        application: &DirectiveApplication,
        kind: DirectiveLocation,
        site: &str,
        location: Option<&SourceLocation>,
    ) {
        let Some(definition) = self.directives.get(application.name.as_str()).copied() else {
            if !BUILTIN_DIRECTIVES.contains(&application.name.as_str()) {
                self.diagnostics.error(
                    codes::UNKNOWN_DIRECTIVE,
                    format!(
                        "Directive '@{}' applied to '{}' is not defined",
                        application.name, site
                    ),
                    location.cloned(),
                );
            }
            return;
        };

        if !definition.locations.contains(&kind) {
            let allowed: Vec<&str> = definition.locations.iter().map(|l| l.as_str()).collect();
            self.diagnostics.error(
                codes::DIRECTIVE_LOCATION_MISMATCH,
                format!(
                    "Directive '@{}' cannot be applied to {} '{}'; allowed locations: {}",
                    application.name,
                    kind,
                    site,
                    allowed.join(", ")
                ),
                location.cloned(),
            );
        }

        for argument in &definition.arguments {
            let required = !argument.ty.nullable && argument.default_value.is_none();
            if required && application.argument(&argument.name).is_none() {
                self.diagnostics.error(
                    codes::DIRECTIVE_MISSING_ARGUMENT,
                    format!(
                        "Directive '@{}' on '{}' is missing required argument '{}'",
                        application.name, site, argument.name
                    ),
                    location.cloned(),
                );
            }
        }
        for (name, _) in &application.arguments {
            if !definition.arguments.iter().any(|a| &a.name == name) {
                self.diagnostics.error(
                    codes::INVALID_DIRECTIVE,
                    format!(
                        "Directive '@{}' on '{}' has no argument '{}'",
                        application.name, site, name
                    ),
                    location.cloned(),
                );
            }
        }
    }
}
