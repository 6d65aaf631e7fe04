//! Rule Engine Core - boolean eligibility rules over named attributes
//!
//! Rules such as `(age > 30 AND department = 'Sales') OR age < 25` are parsed
//! into an AST, combined, persisted as printable text and evaluated against
//! attribute records. Python bindings are available behind the `python`
//! feature.

pub mod config;
pub mod engine;
pub mod error;
pub mod rule;
pub mod store;

#[cfg(feature = "python")]
mod python;

pub use config::{EngineConfig, KeywordCasing};
pub use engine::{combine_rules, create_rule, CompiledRule, RuleEngine};
pub use error::{Result, RuleError};
pub use rule::{
    evaluate as evaluate_rule, from_printable, to_printable, Node, Record, Symbol, Value,
};
pub use store::{InMemoryRuleStore, RuleRecord, RuleStore};
