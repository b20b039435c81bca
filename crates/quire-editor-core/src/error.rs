//! Error types for tab switching and configuration.

use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

use crate::types::Direction;

/// Failures reported by the conversion gateway or the reload service.
///
/// None of these is fatal: the coordinator logs them, invalidates the cache
/// slot of the failed direction and moves back to the tab whose content is
/// still valid.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[non_exhaustive]
pub enum ConversionError {
    /// The gateway failed or rejected the payload.
    #[error("conversion to {direction} failed: {message}")]
    #[diagnostic(code(quire::conversion))]
    Failed {
        direction: Direction,
        message: String,
    },

    /// Rebuilding the rich text area from the template failed.
    #[error("reloading the rich text area failed: {message}")]
    #[diagnostic(code(quire::reload))]
    Reload { message: String },
}

impl ConversionError {
    pub fn failed(direction: Direction, message: impl Into<String>) -> Self {
        ConversionError::Failed {
            direction,
            message: message.into(),
        }
    }

    pub fn reload(message: impl Into<String>) -> Self {
        ConversionError::Reload {
            message: message.into(),
        }
    }

    /// The human readable cause, without the direction prefix.
    pub fn message(&self) -> &str {
        match self {
            ConversionError::Failed { message, .. } | ConversionError::Reload { message } => {
                message
            }
        }
    }
}

/// Invalid editor configuration.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration document is not valid JSON for [`crate::EditorConfig`].
    #[error("malformed editor configuration: {0}")]
    #[diagnostic(code(quire::config::json))]
    Json(#[from] serde_json::Error),

    /// A parameter has a value outside its domain.
    #[error("invalid value {value:?} for editor parameter `{key}`")]
    #[diagnostic(
        code(quire::config::value),
        help("booleans are `true`/`false`, editors are `wysiwyg`/`source`")
    )]
    InvalidValue { key: SmolStr, value: String },

    /// No source syntax was configured.
    #[error("the source syntax must not be empty")]
    #[diagnostic(code(quire::config::syntax))]
    EmptySyntax,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_display() {
        let err = ConversionError::failed(Direction::ToSource, "parser exploded");
        assert_eq!(err.to_string(), "conversion to source failed: parser exploded");
        assert_eq!(err.message(), "parser exploded");

        let err = ConversionError::reload("HTTP 500");
        assert_eq!(err.to_string(), "reloading the rich text area failed: HTTP 500");
    }
}
