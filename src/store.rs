//! Rule records and their storage

use crate::error::{Result, RuleError};
use crate::rule::{from_printable, Node};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A named rule as persisted: the source string and its printable tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub name: String,
    pub rule_string: String,
    pub printable: String,
    pub created_at: DateTime<Utc>,
}

impl RuleRecord {
    pub fn new(name: impl Into<String>, rule_string: impl Into<String>, root: &Node) -> Self {
        Self {
            name: name.into(),
            rule_string: rule_string.into(),
            printable: root.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Rebuild the stored tree
    pub fn root(&self) -> Node {
        from_printable(&self.printable)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Storage for rule records, keyed by unique name
pub trait RuleStore: Send + Sync {
    /// Persist a record; names are unique
    fn save(&self, record: RuleRecord) -> Result<()>;

    fn find(&self, name: &str) -> Option<RuleRecord>;

    /// All records in the order they were saved
    fn list(&self) -> Vec<RuleRecord>;
}

/// Process-local rule store
#[derive(Debug, Default)]
pub struct InMemoryRuleStore {
    records: RwLock<Vec<RuleRecord>>,
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl RuleStore for InMemoryRuleStore {
    fn save(&self, record: RuleRecord) -> Result<()> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.name == record.name) {
            return Err(RuleError::DuplicateRule(record.name));
        }

        info!(name = %record.name, printable = %record.printable, "rule saved");
        records.push(record);
        Ok(())
    }

    fn find(&self, name: &str) -> Option<RuleRecord> {
        self.records.read().iter().find(|r| r.name == name).cloned()
    }

    fn list(&self) -> Vec<RuleRecord> {
        self.records.read().clone()
    }
}
