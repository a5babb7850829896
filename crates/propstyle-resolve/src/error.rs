//! Errors raised while loading settings text.
//!
//! Only loading can fail. Normalization and processing degrade silently.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for settings loading failures.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// YAML or JSON syntax error.
    #[error("failed to parse settings{}: {message}", location(.path))]
    Parse {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Error message from the parser.
        message: String,
    },

    /// The settings file could not be read.
    #[error("failed to load settings {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An allowed-prop pattern does not compile.
    #[error("invalid allowed-prop pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A category or entry has the wrong shape.
    #[error("invalid definition for '{name}': {message}")]
    InvalidDefinition {
        /// Dotted name of the offending entry, e.g. `shorthands.bg`.
        name: String,
        /// Description of what was wrong.
        message: String,
    },
}

impl SettingsError {
    /// Creates an invalid-definition error.
    pub fn invalid(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Attaches a source path to a parse error that has none.
    pub fn with_path(self, source_path: impl Into<PathBuf>) -> Self {
        match self {
            SettingsError::Parse { path: None, message } => SettingsError::Parse {
                path: Some(source_path.into()),
                message,
            },
            other => other,
        }
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

/// Result type for settings loading.
pub type Result<T> = std::result::Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = SettingsError::Parse {
            path: None,
            message: "unexpected end".to_string(),
        };
        assert_eq!(err.to_string(), "failed to parse settings: unexpected end");

        let err = err.with_path("theme.yaml");
        assert_eq!(
            err.to_string(),
            "failed to parse settings theme.yaml: unexpected end"
        );
    }

    #[test]
    fn test_invalid_definition_display() {
        let err = SettingsError::invalid("shorthands.bg", "expected a mapping");
        let msg = err.to_string();
        assert!(msg.contains("shorthands.bg"));
        assert!(msg.contains("expected a mapping"));
    }
}
