//! Engine configuration
//!
//! Loaded from JSON or, with the `python` feature, from a Python dict.

use crate::error::{Result, RuleError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which spellings of the logical connectives the tokenizer accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCasing {
    /// Only `AND` / `OR`
    #[default]
    Upper,
    /// Any casing, e.g. `and`, `Or`
    Any,
}

impl FromStr for KeywordCasing {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "upper" => Ok(KeywordCasing::Upper),
            "any" => Ok(KeywordCasing::Any),
            other => Err(RuleError::Deserialization(format!(
                "Unknown keyword casing: {}",
                other
            ))),
        }
    }
}

/// Options for a [`RuleEngine`](crate::engine::RuleEngine)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Connective spellings recognized when tokenizing
    pub keyword_casing: KeywordCasing,
    /// Reject rules the parser could only read leniently
    pub strict: bool,
}

impl EngineConfig {
    /// Parse a configuration from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.keyword_casing, KeywordCasing::Upper);
        assert!(!config.strict);
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{"strict": true}"#).unwrap();
        assert!(config.strict);
        assert_eq!(config.keyword_casing, KeywordCasing::Upper);

        let config = EngineConfig::from_json(r#"{"keyword_casing": "any"}"#).unwrap();
        assert_eq!(config.keyword_casing, KeywordCasing::Any);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = EngineConfig::from_json(r#"{"keyword_casing": "lower"}"#).unwrap_err();
        assert!(matches!(err, RuleError::Deserialization(_)));
    }

    #[test]
    fn test_keyword_casing_from_str() {
        assert_eq!("any".parse::<KeywordCasing>().unwrap(), KeywordCasing::Any);
        assert!("ANY".parse::<KeywordCasing>().is_err());
    }
}
