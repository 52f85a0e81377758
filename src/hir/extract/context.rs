//! Extraction context: checker, configuration and registry shared by every
//! extraction function, plus the diagnostics sink.

use smol_str::SmolStr;

use super::registry::TypeRegistry;
use crate::base::SourceLocation;
use crate::checker::{NamedType, SymbolId, SymbolOrigin, TypeChecker};
use crate::config::{Config, ScalarMapping};
use crate::hir::diagnostics::DiagnosticCollector;
use crate::hir::types::Deprecation;

/// Which side of the schema a field is extracted for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Position {
    Output,
    Input,
}

/// Where a set of fields lives: owning type (or path), side and fallback location.
#[derive(Clone, Debug)]
pub(crate) struct FieldSite {
    /// `User`, `User.profile`, `Query.users` or `@auth`.
    pub owner: String,
    pub position: Position,
    pub location: Option<SourceLocation>,
}

impl FieldSite {
    pub fn new(owner: impl Into<String>, position: Position, location: Option<SourceLocation>) -> Self {
        Self {
            owner: owner.into(),
            position,
            location,
        }
    }

    /// Site for the fields of an inline object held by `field`.
    pub fn nested(&self, field: &str, location: Option<SourceLocation>) -> Self {
        Self {
            owner: format!("{}.{}", self.owner, field),
            position: self.position,
            location: location.or_else(|| self.location.clone()),
        }
    }
}

/// A field type that has no schema representation, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Excluded(pub String);

impl Excluded {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Extraction state passed through all extraction functions.
pub(crate) struct ExtractionContext<'a, C: TypeChecker + ?Sized> {
    pub checker: &'a C,
    pub config: &'a Config,
    pub registry: &'a TypeRegistry,
    pub diagnostics: &'a mut DiagnosticCollector,
    /// Anonymous aliases currently being expanded.
    pub expanding: Vec<SymbolId>,
}

impl<'a, C: TypeChecker + ?Sized> ExtractionContext<'a, C> {
    pub fn new(
        checker: &'a C,
        config: &'a Config,
        registry: &'a TypeRegistry,
        diagnostics: &'a mut DiagnosticCollector,
    ) -> Self {
        Self {
            checker,
            config,
            registry,
            diagnostics,
            expanding: Vec::new(),
        }
    }

    pub fn origin(&self, named: &NamedType) -> Option<SymbolOrigin> {
        self.checker.origin(named.symbol)
    }

    pub fn is_runtime(&self, origin: &SymbolOrigin) -> bool {
        origin.module == self.config.runtime_module
    }

    /// Configured scalar whose backing type is the given symbol.
    pub fn config_scalar(&self, origin: &SymbolOrigin) -> Option<&'a ScalarMapping> {
        self.config
            .scalars
            .iter()
            .find(|m| m.ts_type.matches(&origin.module, &origin.name))
    }

    /// Description and deprecation from a symbol's doc comment.
    ///
    /// An explicit `@description` tag wins over the comment body.
    pub fn documentation(&self, symbol: Option<SymbolId>) -> (Option<String>, Option<Deprecation>) {
        let Some(doc) = symbol.and_then(|s| self.checker.documentation(s)) else {
            return (None, None);
        };
        let description = doc
            .tag("description")
            .and_then(|tag| tag.text.clone())
            .or(doc.text.clone())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        let deprecation = doc.tag("deprecated").map(|tag| Deprecation {
            reason: tag
                .text
                .as_ref()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        });
        (description, deprecation)
    }

    /// Name of the registered type a reference points at.
    pub fn registered_name(&self, named: &NamedType) -> Option<SmolStr> {
        let origin = self.origin(named)?;
        self.registry.get(&origin).map(|entry| entry.name.clone())
    }
}
