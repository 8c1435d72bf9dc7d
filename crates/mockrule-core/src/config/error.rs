//! Error types for configuration loading.

use crate::mocks::RegisterError;
use std::fmt;
use std::io;

/// Configuration loading error
#[derive(Debug)]
pub enum ConfigError {
    /// JSON parsing error
    Json(serde_json::Error),
    /// YAML parsing error
    Yaml(serde_yaml::Error),
    /// Unknown file type
    UnknownFileType(String),
    /// File could not be read
    Io { path: String, source: io::Error },
    /// Invalid glob pattern
    Pattern(glob::PatternError),
    /// Directory entry could not be read while expanding a glob
    Glob(glob::GlobError),
    /// Route definition rejected by the registry
    Register(RegisterError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "JSON parsing error: {}", e),
            ConfigError::Yaml(e) => write!(f, "YAML parsing error: {}", e),
            ConfigError::UnknownFileType(path) => write!(f, "Unknown file type: {}", path),
            ConfigError::Io { path, source } => write!(f, "Failed to read {}: {}", path, source),
            ConfigError::Pattern(e) => write!(f, "Invalid glob pattern: {}", e),
            ConfigError::Glob(e) => write!(f, "Glob error: {}", e),
            ConfigError::Register(e) => write!(f, "Invalid route definition: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::Yaml(e) => Some(e),
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Pattern(e) => Some(e),
            ConfigError::Glob(e) => Some(e),
            ConfigError::Register(e) => Some(e),
            ConfigError::UnknownFileType(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

impl From<glob::PatternError> for ConfigError {
    fn from(err: glob::PatternError) -> Self {
        ConfigError::Pattern(err)
    }
}

impl From<glob::GlobError> for ConfigError {
    fn from(err: glob::GlobError) -> Self {
        ConfigError::Glob(err)
    }
}

impl From<RegisterError> for ConfigError {
    fn from(err: RegisterError) -> Self {
        ConfigError::Register(err)
    }
}
