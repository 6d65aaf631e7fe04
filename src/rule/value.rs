//! Attribute values and records

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Attribute value: rules only know integers and text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
}

/// Attribute record a rule is evaluated against
pub type Record = HashMap<String, Value>;

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Coerce literal text from a rule into a value.
///
/// Surrounding single quotes are stripped first; what remains becomes an
/// integer when it is all ASCII digits and fits in `i64`, text otherwise.
/// So `'30'` compares as the integer 30.
pub fn coerce_literal(text: &str) -> Value {
    let stripped = text.trim().trim_matches('\'');
    if !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(i) = stripped.parse::<i64>() {
            return Value::Int(i);
        }
    }
    Value::Text(stripped.to_string())
}
