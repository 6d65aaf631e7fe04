//! Configured entry point for creating, combining and evaluating rules

use crate::config::EngineConfig;
use crate::error::{Result, RuleError};
use crate::rule::{
    check_printable, combine, evaluate, parse_with_diagnostics, tokenize_with, validate, Node,
    ParseAmbiguity, Record, Token,
};
use crate::store::{RuleRecord, RuleStore};
use tracing::debug;

/// A created rule together with what the parser had to read leniently
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    pub root: Node,
    pub ambiguities: Vec<ParseAmbiguity>,
}

/// Rule engine
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: EngineConfig,
}

impl RuleEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tokenize(&self, rule: &str) -> Vec<Token> {
        tokenize_with(rule, self.config.keyword_casing)
    }

    /// Validate and parse a rule string into a tree
    pub fn create_rule(&self, rule: &str) -> Result<Node> {
        self.create_rule_with_diagnostics(rule).map(|compiled| compiled.root)
    }

    /// Validate and parse a rule string, keeping the parse diagnostics.
    ///
    /// In strict mode the first ambiguity is returned as an error.
    pub fn create_rule_with_diagnostics(&self, rule: &str) -> Result<CompiledRule> {
        validate(rule)?;

        let tokens = self.tokenize(rule);
        debug!(rule, ?tokens, "tokenized rule");

        let outcome = parse_with_diagnostics(tokens);
        if self.config.strict {
            if let Some(first) = outcome.ambiguities.first() {
                return Err(RuleError::ParseAmbiguity(first.to_string()));
            }
        }

        let root = outcome
            .root
            .ok_or_else(|| RuleError::invalid(rule, "Rule contains no expression"))?;

        Ok(CompiledRule {
            root,
            ambiguities: outcome.ambiguities,
        })
    }

    /// Create every rule and join them with AND.
    ///
    /// No rules gives `Ok(None)`. The first invalid rule fails the whole call.
    pub fn combine_rules<S: AsRef<str>>(&self, rules: &[S]) -> Result<Option<Node>> {
        let trees = rules
            .iter()
            .map(|rule| self.create_rule(rule.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        debug!(count = trees.len(), "combining rules");
        Ok(combine(trees))
    }

    pub fn evaluate(&self, root: &Node, record: &Record) -> bool {
        evaluate(root, record)
    }

    /// Create a rule and save it under `name`
    pub fn register(&self, store: &dyn RuleStore, name: &str, rule: &str) -> Result<RuleRecord> {
        let root = self.create_rule(rule)?;
        let record = RuleRecord::new(name, rule, &root);
        store.save(record.clone())?;
        Ok(record)
    }

    /// Evaluate a stored rule by name through its printable form
    pub fn evaluate_stored(
        &self,
        store: &dyn RuleStore,
        name: &str,
        record: &Record,
    ) -> Result<bool> {
        let stored = store
            .find(name)
            .ok_or_else(|| RuleError::RuleNotFound(name.to_string()))?;
        Ok(check_printable(&stored.printable, record))
    }
}

/// Validate and parse a rule string with the default configuration
pub fn create_rule(rule: &str) -> Result<Node> {
    RuleEngine::default().create_rule(rule)
}

/// Create and AND-combine rule strings with the default configuration
pub fn combine_rules<S: AsRef<str>>(rules: &[S]) -> Result<Option<Node>> {
    RuleEngine::default().combine_rules(rules)
}
