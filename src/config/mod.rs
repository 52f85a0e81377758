//! Configuration for a generation run.
//!
//! Loading configuration files from disk is left to the caller; this module
//! only defines the shape (deserializable from JSON) and validates it.

use serde::Deserialize;
use thiserror::Error;

use crate::base::{is_reserved_name, is_valid_name};

/// Default module path for the runtime brands and wrappers.
pub const DEFAULT_RUNTIME_MODULE: &str = "@typegraph/runtime";

/// Default root directory for schema type declarations.
pub const DEFAULT_SOURCE_ROOT: &str = "src/schema";

/// Scalar names every GraphQL schema provides.
pub const BUILTIN_SCALARS: [&str; 5] = ["ID", "String", "Int", "Float", "Boolean"];

/// Errors that can occur while reading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON or has the wrong shape.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A scalar mapping uses a name outside the GraphQL name grammar.
    #[error("Invalid scalar name '{0}'")]
    InvalidScalarName(String),

    /// A scalar mapping tries to redefine ID/String/Int/Float/Boolean.
    #[error("Scalar '{0}' is built in and cannot be remapped")]
    BuiltinScalar(String),

    /// The same TypeScript type is mapped twice with the same direction.
    #[error("Duplicate scalar mapping for '{ts_type}' ({name})")]
    DuplicateMapping { name: String, ts_type: String },

    /// One TypeScript type is mapped to two different scalar names.
    #[error("Type '{ts_type}' is mapped to both '{first}' and '{second}'")]
    ConflictingMapping {
        ts_type: String,
        first: String,
        second: String,
    },

    /// A root path is empty.
    #[error("Missing required {0}")]
    Missing(&'static str),
}

/// Restricts a custom scalar to one side of the schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarDirection {
    Input,
    Output,
}

impl ScalarDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarDirection::Input => "input",
            ScalarDirection::Output => "output",
        }
    }
}

/// Where the backing TypeScript type of a custom scalar is declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct TsTypeRef {
    /// Exported symbol name (e.g. `Date`, `DateTimeString`).
    pub name: String,
    /// Module path declaring it. `None` matches a symbol from any module.
    #[serde(default)]
    pub from: Option<String>,
}

impl TsTypeRef {
    pub fn display(&self) -> String {
        match &self.from {
            Some(from) => format!("{}#{}", from, self.name),
            None => self.name.clone(),
        }
    }

    /// Check if this reference matches a symbol origin.
    pub fn matches(&self, module: &str, name: &str) -> bool {
        self.name == name && self.from.as_deref().is_none_or(|from| from == module)
    }
}

/// A custom scalar registered through configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarMapping {
    /// GraphQL scalar name.
    pub name: String,
    /// The TypeScript type standing for the scalar.
    pub ts_type: TsTypeRef,
    /// Restrict usage to input or output positions.
    #[serde(default)]
    pub only: Option<ScalarDirection>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Options for one generation run.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory whose exported declarations become schema types.
    pub source_root: String,
    /// Directory scanned for operations. Defaults to `source_root`.
    pub resolver_root: Option<String>,
    /// Module path of the runtime brands.
    pub runtime_module: String,
    /// Custom scalar mappings.
    pub scalars: Vec<ScalarMapping>,
    /// Remove types unreachable from Query/Mutation.
    pub prune_unreachable: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: DEFAULT_SOURCE_ROOT.to_string(),
            resolver_root: None,
            runtime_module: DEFAULT_RUNTIME_MODULE.to_string(),
            scalars: Vec::new(),
            prune_unreachable: false,
        }
    }
}

impl Config {
    /// Parse configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The directory scanned for operations.
    pub fn resolver_root(&self) -> &str {
        self.resolver_root.as_deref().unwrap_or(&self.source_root)
    }

    /// Check scalar mappings and paths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runtime_module.trim().is_empty() {
            return Err(ConfigError::Missing("runtimeModule"));
        }

        let mut seen: Vec<&ScalarMapping> = Vec::new();
        for mapping in &self.scalars {
            if !is_valid_name(&mapping.name) || is_reserved_name(&mapping.name) {
                return Err(ConfigError::InvalidScalarName(mapping.name.clone()));
            }
            if BUILTIN_SCALARS.contains(&mapping.name.as_str()) {
                return Err(ConfigError::BuiltinScalar(mapping.name.clone()));
            }
            for previous in &seen {
                if previous.ts_type != mapping.ts_type {
                    continue;
                }
                if previous.name != mapping.name {
                    return Err(ConfigError::ConflictingMapping {
                        ts_type: mapping.ts_type.display(),
                        first: previous.name.clone(),
                        second: mapping.name.clone(),
                    });
                }
                if previous.only == mapping.only {
                    return Err(ConfigError::DuplicateMapping {
                        name: mapping.name.clone(),
                        ts_type: mapping.ts_type.display(),
                    });
                }
            }
            seen.push(mapping);
        }
        Ok(())
    }
}
