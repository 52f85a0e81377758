//! Diagnostic assertion helpers for pipeline tests.

use typegraph::{Diagnostic, GenerateResult};

/// Codes of every error, in report order.
pub fn error_codes(result: &GenerateResult) -> Vec<&'static str> {
    result.diagnostics.errors.iter().map(|d| d.code).collect()
}

/// Codes of every warning, in report order.
pub fn warning_codes(result: &GenerateResult) -> Vec<&'static str> {
    result.diagnostics.warnings.iter().map(|d| d.code).collect()
}

fn describe(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  [{}] {}", d.code, d.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assert a run produced output and no errors.
pub fn assert_success(result: &GenerateResult) {
    assert!(
        result.is_success() && !result.diagnostics.has_errors(),
        "Expected success, got {} error(s):\n{}",
        result.diagnostics.errors.len(),
        describe(&result.diagnostics.errors)
    );
}

/// Assert a run failed with exactly one error, carrying `code`, and return it.
pub fn assert_single_error<'a>(result: &'a GenerateResult, code: &str) -> &'a Diagnostic {
    assert!(result.output.is_none(), "failed runs must not produce output");
    assert_eq!(
        result.diagnostics.errors.len(),
        1,
        "Expected exactly one error, got:\n{}",
        describe(&result.diagnostics.errors)
    );
    let error = &result.diagnostics.errors[0];
    assert_eq!(error.code, code, "unexpected error: {}", error.message);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use typegraph::{Config, MemoryChecker, generate};

    #[test]
    fn test_empty_project_is_a_success() {
        let result = generate(&MemoryChecker::new(), &Config::default());
        assert_success(&result);
        assert!(error_codes(&result).is_empty());
        assert!(warning_codes(&result).is_empty());
    }
}
