//! Result and error types for the widget's edges.
//!
//! Calculator transitions never fail: bad arithmetic shows up as `NaN` or
//! `Infinity` in the display. These errors only cover configuration and
//! token parsing at the host boundary.

use thiserror::Error;

/// Result type for widget operations that can fail
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Errors reported at the widget's host boundary
#[derive(Debug, Error)]
pub enum WidgetError {
    /// A configuration value is out of range
    #[error("Invalid configuration: {field} {message}")]
    InvalidConfig {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// Configuration text could not be parsed as JSON
    #[error("Failed to parse JSON configuration: {0}")]
    ConfigJson(#[from] serde_json::Error),

    /// Configuration text could not be parsed as YAML
    #[error("Failed to parse YAML configuration: {0}")]
    ConfigYaml(#[from] serde_yaml_ng::Error),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Keypad token with no matching action
    #[error("Unknown key: {key}")]
    UnknownKey {
        /// The token as given
        key: String,
    },

    /// Operator symbol with no matching operator
    #[error("Unknown operator: {symbol}")]
    UnknownOperator {
        /// The symbol as given
        symbol: String,
    },
}

impl WidgetError {
    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Create an unknown key error
    #[must_use]
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = WidgetError::invalid_config("expanded.width", "must be finite");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: expanded.width must be finite"
        );
    }

    #[test]
    fn test_unknown_key_display() {
        let err = WidgetError::unknown_key("F13");
        assert_eq!(err.to_string(), "Unknown key: F13");
    }

    #[test]
    fn test_unknown_operator_display() {
        let err = WidgetError::UnknownOperator {
            symbol: "^".into(),
        };
        assert!(err.to_string().contains('^'));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: WidgetError = parse.unwrap_err().into();
        assert!(matches!(err, WidgetError::ConfigJson(_)));
    }

    #[test]
    fn test_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(WidgetError::unknown_key("?"));
        assert!(err.to_string().contains("Unknown key"));
    }
}
