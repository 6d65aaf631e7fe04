//! Python bindings

use crate::config::{EngineConfig, KeywordCasing};
use crate::engine::RuleEngine;
use crate::error::RuleError;
use crate::rule::{self, Record, Value};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict};
use std::sync::Arc;

// ============================================================================
// Cached Configuration
// ============================================================================

/// Engine configured by `init_config`
static CACHED_ENGINE: OnceCell<Arc<RwLock<RuleEngine>>> = OnceCell::new();

/// Configured engine, or the default one before `init_config` is called
fn current_engine() -> RuleEngine {
    CACHED_ENGINE
        .get()
        .map(|engine| engine.read().clone())
        .unwrap_or_default()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Deserialize engine options from a Python dict
fn deserialize_config(dict: &Bound<'_, PyDict>) -> PyResult<EngineConfig> {
    let mut config = EngineConfig::default();

    if let Some(casing) = dict.get_item("keyword_casing")? {
        let casing: String = casing.extract()?;
        config.keyword_casing = casing.parse::<KeywordCasing>()?;
    }
    if let Some(strict) = dict.get_item("strict")? {
        config.strict = strict.extract()?;
    }

    Ok(config)
}

/// Deserialize an attribute record; values must be `int` or `str`
fn deserialize_record(dict: &Bound<'_, PyDict>) -> PyResult<Record> {
    let mut record = Record::with_capacity(dict.len());
    for (key, value) in dict.iter() {
        let name: String = key.extract()?;
        let value = if value.is_instance_of::<PyBool>() {
            None
        } else if let Ok(i) = value.extract::<i64>() {
            Some(Value::Int(i))
        } else if let Ok(s) = value.extract::<String>() {
            Some(Value::Text(s))
        } else {
            None
        };

        match value {
            Some(v) => {
                record.insert(name, v);
            }
            None => {
                return Err(RuleError::Deserialization(format!(
                    "Attribute {} must be int or str",
                    name
                ))
                .into())
            }
        }
    }
    Ok(record)
}

// ============================================================================
// Python Functions
// ============================================================================

/// Configure the engine used by the other functions
///
/// # Arguments
/// * `config` - `{"keyword_casing": "upper" | "any", "strict": bool}`, all keys optional
#[pyfunction]
fn init_config(config: &Bound<'_, PyDict>) -> PyResult<()> {
    let engine = RuleEngine::new(deserialize_config(config)?);

    if let Some(existing) = CACHED_ENGINE.get() {
        *existing.write() = engine;
    } else {
        let _ = CACHED_ENGINE.set(Arc::new(RwLock::new(engine)));
    }

    Ok(())
}

/// Create a rule and return its printable form
///
/// # Raises
/// ValueError if the rule is not a string, is empty, or has invalid characters
#[pyfunction]
fn create_rule(rule: &Bound<'_, PyAny>) -> PyResult<String> {
    let rule: String = rule
        .extract()
        .map_err(|_| RuleError::invalid("<non-string>", "Rule must be a string"))?;
    let root = current_engine().create_rule(&rule)?;
    Ok(root.to_string())
}

/// AND-combine rules and return the printable form, or `None` for no rules
#[pyfunction]
fn combine_rules(rules: Vec<String>) -> PyResult<Option<String>> {
    let combined = current_engine().combine_rules(&rules)?;
    Ok(combined.map(|root| root.to_string()))
}

/// Evaluate a printable rule against `data`
#[pyfunction]
fn evaluate_rule(printable: &str, data: &Bound<'_, PyDict>) -> PyResult<bool> {
    let record = deserialize_record(data)?;
    Ok(rule::check_printable(printable, &record))
}

/// Evaluate a printable rule asynchronously
///
/// Evaluation runs on a blocking thread so the asyncio event loop stays
/// responsive.
///
/// # Example (Python)
/// ```python
/// ok = await evaluate_async("(age > 30)", {"age": 35})
/// ```
#[pyfunction]
fn evaluate_async<'py>(
    py: Python<'py>,
    printable: String,
    data: &Bound<'py, PyDict>,
) -> PyResult<Bound<'py, PyAny>> {
    let record = deserialize_record(data)?;

    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        tokio::task::spawn_blocking(move || rule::check_printable(&printable, &record))
            .await
            .map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                    "Evaluation task panicked: {}",
                    e
                ))
            })
    })
}

/// Drop cached trees built from printable forms
#[pyfunction]
fn clear_cache() {
    rule::clear_cache();
}

// ============================================================================
// Python Module Definition
// ============================================================================

#[pymodule]
fn rule_engine_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_config, m)?)?;
    m.add_function(wrap_pyfunction!(create_rule, m)?)?;
    m.add_function(wrap_pyfunction!(combine_rules, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_rule, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_async, m)?)?;
    m.add_function(wrap_pyfunction!(clear_cache, m)?)?;
    Ok(())
}
