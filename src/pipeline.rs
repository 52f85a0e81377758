//! End-to-end generation.
//!
//! ```text
//! Config::validate
//!     → extract_types → extract_operations
//!     → convert_schema → validate_schema → integrate_schema
//!     → print_sdl / document_ast / resolver_map_json
//! ```
//!
//! Each stage runs to completion so sibling problems are all reported, but
//! the run stops after the first stage that left an error behind.

use serde_json::Value;
use tracing::{debug, info};

use crate::checker::TypeChecker;
use crate::config::Config;
use crate::emit::{document_ast, print_sdl, resolver_map_json};
use crate::hir::{DiagnosticCollector, Diagnostics, codes, extract_operations, extract_types};
use crate::integrate::{ResolverMap, SchemaDocument, integrate_schema};
use crate::schema::convert_schema;
use crate::validate::validate_schema;

/// Artifacts of a successful run.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerateOutput {
    pub document: SchemaDocument,
    pub resolvers: ResolverMap,
    /// Schema text.
    pub sdl: String,
    /// `DocumentNode`-shaped JSON.
    pub ast: Value,
    /// Resolver map JSON.
    pub resolver_map: Value,
}

/// Outcome of [`generate`].
#[derive(Clone, Debug, PartialEq)]
pub struct GenerateResult {
    /// `None` whenever `diagnostics` holds an error.
    pub output: Option<GenerateOutput>,
    pub diagnostics: Diagnostics,
}

impl GenerateResult {
    pub fn is_success(&self) -> bool {
        self.output.is_some()
    }
}

/// Run the whole pipeline over the declarations `checker` reports.
pub fn generate<C: TypeChecker + ?Sized>(checker: &C, config: &Config) -> GenerateResult {
    let mut collector = DiagnosticCollector::new();
    let output = run(checker, config, &mut collector);
    let diagnostics = collector.finish();
    info!(
        "[PIPELINE] {} with {} errors, {} warnings",
        if output.is_some() { "generated schema" } else { "no output" },
        diagnostics.errors.len(),
        diagnostics.warnings.len()
    );
    GenerateResult {
        output,
        diagnostics,
    }
}

fn run<C: TypeChecker + ?Sized>(
    checker: &C,
    config: &Config,
    diagnostics: &mut DiagnosticCollector,
) -> Option<GenerateOutput> {
    if let Err(err) = config.validate() {
        diagnostics.error(codes::INVALID_CONFIG, err.to_string(), None);
        return None;
    }

    let (types, registry) = extract_types(checker, config, diagnostics);
    checkpoint(diagnostics, "type extraction")?;

    let operations = extract_operations(checker, config, &registry, &types, diagnostics);
    checkpoint(diagnostics, "operation extraction")?;

    let converted = convert_schema(&types, &operations, diagnostics);
    checkpoint(diagnostics, "conversion")?;

    validate_schema(&converted, diagnostics);
    checkpoint(diagnostics, "validation")?;

    let (document, resolvers) = integrate_schema(converted, config.prune_unreachable, diagnostics);
    checkpoint(diagnostics, "integration")?;

    Some(GenerateOutput {
        sdl: print_sdl(&document),
        ast: document_ast(&document),
        resolver_map: resolver_map_json(&resolvers),
        document,
        resolvers,
    })
}

/// `None` once any error has been reported.
fn checkpoint(diagnostics: &DiagnosticCollector, stage: &str) -> Option<()> {
    if diagnostics.has_errors() {
        debug!(
            "[PIPELINE] halting after {}: {} errors",
            stage,
            diagnostics.error_count()
        );
        return None;
    }
    debug!("[PIPELINE] {} complete", stage);
    Some(())
}
