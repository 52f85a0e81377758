//! Diagnostics: error and warning reporting for every pipeline stage.
//!
//! Structural problems never abort a stage early. Each stage pushes
//! [`Diagnostic`]s into a [`DiagnosticCollector`], which deduplicates them and
//! keeps errors and warnings apart, in the order they were first reported.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::base::SourceLocation;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A diagnostic message with an optional location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Stable code from [`codes`].
    pub code: &'static str,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Severity level.
    pub severity: Severity,
    pub location: Option<SourceLocation>,
    /// Other places involved (e.g. the first definition of a duplicate).
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedInfo {
    pub location: SourceLocation,
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: &'static str, message: impl Into<Arc<str>>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: Severity::Error,
            location: None,
            related: Vec::new(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: &'static str, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, message)
        }
    }

    /// Set the location.
    pub fn at(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }

    /// Add related information.
    pub fn with_related(mut self, location: SourceLocation, message: impl Into<Arc<str>>) -> Self {
        self.related.push(RelatedInfo {
            location,
            message: message.into(),
        });
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{}: ", location)?;
        }
        write!(
            f,
            "{} [{}]: {}",
            self.severity.as_str(),
            self.code,
            self.message
        )
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Stable diagnostic codes.
///
/// ## Groups
///
/// - **Extraction**: declared types, fields, metadata and scalars
/// - **Operations**: resolver conventions and bindings
/// - **Validation**: interfaces, cycles, categories and directives
/// - **Integration**: extension targets and merged fields
pub mod codes {
    // ========================================================================
    // EXTRACTION
    // ========================================================================

    /// A referenced type cannot be resolved to a declared type or scalar.
    pub const UNRESOLVED_REFERENCE: &str = "UNRESOLVED_REFERENCE";
    /// A symbol from the runtime module is not a known brand or wrapper.
    pub const UNKNOWN_BRAND: &str = "UNKNOWN_BRAND";
    /// Type name is `__`-prefixed, a built-in scalar or a root name.
    pub const RESERVED_TYPE_NAME: &str = "RESERVED_TYPE_NAME";
    pub const DUPLICATE_TYPE_NAME: &str = "DUPLICATE_TYPE_NAME";
    pub const INVALID_TYPE_NAME: &str = "INVALID_TYPE_NAME";
    pub const INVALID_FIELD_NAME: &str = "INVALID_FIELD_NAME";
    pub const RESERVED_FIELD_NAME: &str = "RESERVED_FIELD_NAME";
    /// Field type has no schema representation; the field is dropped.
    pub const UNSUPPORTED_FIELD_TYPE: &str = "UNSUPPORTED_FIELD_TYPE";
    /// Exported declaration that is not a schema type.
    pub const UNSUPPORTED_DECLARATION: &str = "UNSUPPORTED_DECLARATION";
    /// Every field of a type was excluded.
    pub const ALL_FIELDS_EXCLUDED: &str = "ALL_FIELDS_EXCLUDED";
    pub const INVALID_DEFAULT_VALUE: &str = "INVALID_DEFAULT_VALUE";
    pub const INVALID_DIRECTIVE: &str = "INVALID_DIRECTIVE";
    pub const INVALID_ENUM_VALUE: &str = "INVALID_ENUM_VALUE";
    pub const UNSUPPORTED_ENUM: &str = "UNSUPPORTED_ENUM";
    pub const DUPLICATE_ENUM_VALUE: &str = "DUPLICATE_ENUM_VALUE";
    pub const INVALID_UNION_MEMBER: &str = "INVALID_UNION_MEMBER";
    /// Two inline shapes synthesize the same type name.
    pub const INLINE_TYPE_NAME_COLLISION: &str = "INLINE_TYPE_NAME_COLLISION";

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Legacy resolver shapes and operation functions are mixed.
    pub const LEGACY_API_DETECTED: &str = "LEGACY_API_DETECTED";
    pub const MISSING_PARENT_TYPE: &str = "MISSING_PARENT_TYPE";
    pub const MISSING_RESOLVER_VALUE: &str = "MISSING_RESOLVER_VALUE";
    pub const INVALID_RESOLVER_SIGNATURE: &str = "INVALID_RESOLVER_SIGNATURE";
    pub const INVALID_ARGUMENTS_TYPE: &str = "INVALID_ARGUMENTS_TYPE";
    pub const DUPLICATE_OPERATION_FIELD: &str = "DUPLICATE_OPERATION_FIELD";

    // ========================================================================
    // VALIDATION
    // ========================================================================

    pub const INTERFACE_MISSING_FIELD: &str = "INTERFACE_MISSING_FIELD";
    pub const INTERFACE_FIELD_TYPE_MISMATCH: &str = "INTERFACE_FIELD_TYPE_MISMATCH";
    pub const INTERFACE_ARGUMENT_MISMATCH: &str = "INTERFACE_ARGUMENT_MISMATCH";
    pub const IMPLEMENTS_NON_INTERFACE: &str = "IMPLEMENTS_NON_INTERFACE";
    pub const MISSING_TRANSITIVE_INTERFACE: &str = "MISSING_TRANSITIVE_INTERFACE";
    /// A cycle of non-null references with no terminating edge.
    pub const CIRCULAR_REFERENCE: &str = "CIRCULAR_REFERENCE";
    pub const OUTPUT_TYPE_IN_INPUT: &str = "OUTPUT_TYPE_IN_INPUT";
    pub const INPUT_TYPE_IN_OUTPUT: &str = "INPUT_TYPE_IN_OUTPUT";
    pub const UNKNOWN_ARGUMENT_TYPE: &str = "UNKNOWN_ARGUMENT_TYPE";
    pub const SCALAR_DIRECTION_MISMATCH: &str = "SCALAR_DIRECTION_MISMATCH";
    pub const DIRECTIVE_LOCATION_MISMATCH: &str = "DIRECTIVE_LOCATION_MISMATCH";
    pub const UNKNOWN_DIRECTIVE: &str = "UNKNOWN_DIRECTIVE";
    pub const DIRECTIVE_MISSING_ARGUMENT: &str = "DIRECTIVE_MISSING_ARGUMENT";

    // ========================================================================
    // INTEGRATION
    // ========================================================================

    pub const UNKNOWN_TARGET_TYPE: &str = "UNKNOWN_TARGET_TYPE";
    pub const INVALID_EXTENSION_TARGET: &str = "INVALID_EXTENSION_TARGET";
    pub const DUPLICATE_FIELD_DEFINITION: &str = "DUPLICATE_FIELD_DEFINITION";

    /// Configuration was rejected before extraction.
    pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

type DedupKey = (&'static str, Arc<str>, Severity, Option<SourceLocation>);

/// Collects diagnostics across stages.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
    seen: FxHashSet<DedupKey>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic, ignoring exact repeats.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        let key = (
            diagnostic.code,
            diagnostic.message.clone(),
            diagnostic.severity,
            diagnostic.location.clone(),
        );
        if !self.seen.insert(key) {
            return;
        }
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    /// Add an error with a location.
    pub fn error(
        &mut self,
        code: &'static str,
        message: impl Into<Arc<str>>,
        location: Option<SourceLocation>,
    ) {
        self.add(Diagnostic::error(code, message).at(location));
    }

    /// Add a warning with a location.
    pub fn warning(
        &mut self,
        code: &'static str,
        message: impl Into<Arc<str>>,
        location: Option<SourceLocation>,
    ) {
        self.add(Diagnostic::warning(code, message).at(location));
    }

    /// Merge another collector's diagnostics into this one.
    pub fn extend(&mut self, other: DiagnosticCollector) {
        let Diagnostics { errors, warnings } = other.finish();
        for diagnostic in errors.into_iter().chain(warnings) {
            self.add(diagnostic);
        }
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Split into the final error and warning lists.
    pub fn finish(self) -> Diagnostics {
        Diagnostics {
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

/// Deduplicated diagnostics of a run, split by severity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All diagnostics with the given code, errors first.
    pub fn with_code(&self, code: &str) -> Vec<&Diagnostic> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .filter(|d| d.code == code)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: u32) -> Option<SourceLocation> {
        Some(SourceLocation::new("src/schema/user.ts", line, 1))
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error(codes::UNRESOLVED_REFERENCE, "Type 'Foo' not found").at(loc(3));
        assert_eq!(
            diag.to_string(),
            "src/schema/user.ts:3:1: error [UNRESOLVED_REFERENCE]: Type 'Foo' not found"
        );
    }

    #[test]
    fn test_collector_counts() {
        let mut collector = DiagnosticCollector::new();
        collector.error(codes::UNRESOLVED_REFERENCE, "error 1", None);
        collector.error(codes::UNRESOLVED_REFERENCE, "error 2", None);
        collector.warning(codes::UNSUPPORTED_FIELD_TYPE, "warning 1", None);

        assert_eq!(collector.error_count(), 2);
        assert_eq!(collector.warning_count(), 1);
        assert!(collector.has_errors());
    }

    #[test]
    fn test_collector_deduplicates() {
        let mut collector = DiagnosticCollector::new();
        collector.error(codes::CIRCULAR_REFERENCE, "cycle A -> B", loc(1));
        collector.error(codes::CIRCULAR_REFERENCE, "cycle A -> B", loc(1));
        // Same message at another location is kept.
        collector.error(codes::CIRCULAR_REFERENCE, "cycle A -> B", loc(2));
        // Same message as a warning is kept.
        collector.warning(codes::CIRCULAR_REFERENCE, "cycle A -> B", loc(1));

        let diagnostics = collector.finish();
        assert_eq!(diagnostics.errors.len(), 2);
        assert_eq!(diagnostics.warnings.len(), 1);
    }

    #[test]
    fn test_collector_preserves_order() {
        let mut collector = DiagnosticCollector::new();
        collector.error(codes::DUPLICATE_TYPE_NAME, "second", None);
        collector.warning(codes::UNSUPPORTED_DECLARATION, "w", None);
        collector.error(codes::DUPLICATE_TYPE_NAME, "first", None);

        let messages: Vec<_> = collector.errors().iter().map(|d| d.message.as_ref()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn test_extend_merges_and_deduplicates() {
        let mut a = DiagnosticCollector::new();
        a.error(codes::UNKNOWN_TARGET_TYPE, "x", None);
        let mut b = DiagnosticCollector::new();
        b.error(codes::UNKNOWN_TARGET_TYPE, "x", None);
        b.warning(codes::UNSUPPORTED_FIELD_TYPE, "y", None);
        a.extend(b);
        assert_eq!(a.error_count(), 1);
        assert_eq!(a.warning_count(), 1);
    }
}
