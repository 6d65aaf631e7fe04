//! Error types for the rule engine

use thiserror::Error;

/// Main error type for the rule engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Invalid rule {rule:?}: {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("Ambiguous rule: {0}")]
    ParseAmbiguity(String),

    #[error("Rule already exists: {0}")]
    DuplicateRule(String),

    #[error("Rule not found: {0}")]
    RuleNotFound(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl RuleError {
    pub(crate) fn invalid(rule: &str, reason: impl Into<String>) -> Self {
        RuleError::InvalidRule {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for RuleError {
    fn from(err: serde_json::Error) -> Self {
        RuleError::Deserialization(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<RuleError> for pyo3::PyErr {
    fn from(err: RuleError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyKeyError, PyValueError};

        match err {
            RuleError::RuleNotFound(name) => {
                PyKeyError::new_err(format!("Rule not found: {}", name))
            }
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// Result type alias for the rule engine
pub type Result<T> = std::result::Result<T, RuleError>;
