//! Error types for chart configuration parsing.

use chartkit_core::ColorParseError;
use std::fmt;

/// Error type for chart configuration parsing.
#[derive(Debug)]
pub enum ParseError {
    /// YAML parsing error
    Yaml(serde_yaml_ng::Error),
    /// Reading the configuration file failed
    Io(std::io::Error),
    /// Color string could not be parsed
    Color {
        /// Field holding the color
        field: String,
        /// Underlying parse error
        source: ColorParseError,
    },
    /// Theme preset name is not known
    UnknownTheme(String),
    /// Invalid value
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml(e) => write!(f, "YAML error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Color { field, source } => write!(f, "Invalid color for '{field}': {source}"),
            Self::UnknownTheme(name) => write!(f, "Unknown theme preset: {name}"),
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Yaml(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Color { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_yaml_ng::Error> for ParseError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        Self::Yaml(e)
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl ParseError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn color(field: impl Into<String>, source: ColorParseError) -> Self {
        Self::Color {
            field: field.into(),
            source,
        }
    }
}
