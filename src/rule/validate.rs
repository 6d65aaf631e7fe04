//! Character-class check applied to rule strings before parsing

use crate::error::{Result, RuleError};
use once_cell::sync::Lazy;
use regex::Regex;

static ALLOWED_CHARACTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[A-Za-z0-9_\s><='"()]+$"#).unwrap());

/// Reject empty rules and rules with characters outside the allowed set
pub fn validate(rule: &str) -> Result<()> {
    if rule.trim().is_empty() {
        return Err(RuleError::invalid(rule, "Rule string is empty"));
    }
    if !ALLOWED_CHARACTERS.is_match(rule) {
        return Err(RuleError::invalid(rule, "Rule contains invalid characters"));
    }
    Ok(())
}
