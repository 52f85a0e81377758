//! Structural validation of a converted schema.
//!
//! Every check reads the [`ConvertedSchema`] and reports into the shared
//! [`DiagnosticCollector`]; nothing is modified. Operation fields count as
//! fields of the type they extend.
//!
//! ## Checks
//!
//! - `interfaces` - completeness, field and argument compatibility,
//!   transitive interfaces
//! - `cycles` - non-null reference loops among inputs and interfaces
//! - `categories` - input/output misuse, unknown argument types, scalar
//!   direction, union members
//! - `directives` - unknown directives, placement and required arguments

mod categories;
mod cycles;
mod directives;
mod interfaces;


use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::BUILTIN_SCALARS;
use crate::hir::DiagnosticCollector;
use crate::schema::{ConvertedSchema, SchemaDirective, SchemaField, TypeBody, TypeDefinition};

/// Run every structural check over a converted schema.
pub fn validate_schema(schema: &ConvertedSchema, diagnostics: &mut DiagnosticCollector) {
    let before = diagnostics.error_count();
    let mut checker = SchemaChecker::new(schema, diagnostics);
    checker.check_interfaces();
    checker.check_cycles();
    checker.check_categories();
    checker.check_directives();
    debug!(
        "[VALIDATE] {} types, {} new errors",
        schema.types.len(),
        diagnostics.error_count() - before
    );
}

/// Lookup tables over one schema plus the collector findings go to.
pub(crate) struct SchemaChecker<'a> {
    schema: &'a ConvertedSchema,
    types: FxHashMap<&'a str, &'a TypeDefinition>,
    directives: FxHashMap<&'a str, &'a SchemaDirective>,
    /// Operation fields keyed by the type they extend.
    extensions: FxHashMap<&'a str, Vec<&'a SchemaField>>,
    diagnostics: &'a mut DiagnosticCollector,
}

impl<'a> SchemaChecker<'a> {
    pub(crate) fn new(schema: &'a ConvertedSchema, diagnostics: &'a mut DiagnosticCollector) -> Self {
        let types = schema.types.iter().map(|t| (t.name.as_str(), t)).collect();
        let directives = schema
            .directives
            .iter()
            .map(|d| (d.name.as_str(), d))
            .collect();
        let mut extensions: FxHashMap<&str, Vec<&SchemaField>> = FxHashMap::default();
        for operation in &schema.operations {
            extensions
                .entry(operation.target.as_str())
                .or_default()
                .push(&operation.field);
        }
        Self {
            schema,
            types,
            directives,
            extensions,
            diagnostics,
        }
    }

    fn lookup(&self, name: &str) -> Option<&'a TypeDefinition> {
        self.types.get(name).copied()
    }

    /// Declared fields followed by operation fields targeting the type.
    fn fields_of(&self, definition: &'a TypeDefinition) -> Vec<&'a SchemaField> {
        let mut fields: Vec<&SchemaField> = definition.fields().iter().collect();
        if let Some(extra) = self.extensions.get(definition.name.as_str()) {
            fields.extend(extra.iter().copied());
        }
        fields
    }

    /// `concrete` is a member of the abstract type `name`.
    fn is_possible_type(&self, name: &str, concrete: &str) -> bool {
        match self.lookup(name).map(|t| &t.body) {
            Some(TypeBody::Union { members }) => {
                members.iter().any(|m| m == concrete)
            }
            Some(TypeBody::Interface { .. }) => self
                .lookup(concrete)
                .is_some_and(|t| t.interfaces().iter().any(|i| i == name)),
            _ => false,
        }
    }
}

fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}
