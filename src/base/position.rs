/// Position tracking for declarations
///
/// Stores the source location (file/line/column) of declared types, fields and
/// operations for error reporting.
use std::fmt;
use std::sync::Arc;

/// A location in a source file (1-indexed line and column).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub file: Arc<str>,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Location pointing at the start of a file.
    pub fn file_start(file: impl Into<Arc<str>>) -> Self {
        Self::new(file, 1, 1)
    }

    /// Check if this location lies under a directory prefix.
    pub fn is_under(&self, root: &str) -> bool {
        let root = root.trim_end_matches('/');
        if root.is_empty() {
            return true;
        }
        self.file.as_ref() == root
            || self
                .file
                .strip_prefix(root)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
