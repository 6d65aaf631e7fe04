//! Rule evaluator

use crate::rule::ast::{Node, Symbol};
use crate::rule::value::{coerce_literal, Record, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use tracing::debug;

/// `field OP value` fragment held by an operand leaf
static CONDITION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s*([><=]+)\s*([\w']+)").unwrap());

/// Evaluate an AST against a record.
///
/// Never fails: missing fields, malformed fragments, mismatched types and
/// unrecognized operators all evaluate to false. An absent right operand of
/// `AND` / `OR` counts as true.
pub fn evaluate(node: &Node, record: &Record) -> bool {
    match node {
        Node::Operand(text) => check_fragment(text, record),
        Node::Operator {
            symbol,
            left,
            right,
        } => match symbol {
            Symbol::And => {
                evaluate(left, record) && right.as_deref().map_or(true, |r| evaluate(r, record))
            }
            Symbol::Or => {
                evaluate(left, record) || right.as_deref().map_or(true, |r| evaluate(r, record))
            }
            Symbol::Greater | Symbol::Less | Symbol::Equal => match (left.as_ref(), right.as_deref())
            {
                (Node::Operand(field), Some(Node::Operand(literal))) => {
                    check_field(record, field.trim(), symbol, literal)
                }
                _ => false,
            },
            Symbol::Unrecognized(_) => false,
        },
    }
}

/// Evaluate an optional tree; no tree is false
pub fn evaluate_optional(node: Option<&Node>, record: &Record) -> bool {
    node.is_some_and(|n| evaluate(n, record))
}

/// Evaluate an operand holding a whole `field OP value` fragment
fn check_fragment(text: &str, record: &Record) -> bool {
    let Some(caps) = CONDITION_PATTERN.captures(text) else {
        return false;
    };

    let symbol = Symbol::from_text(&caps[2]);
    if !symbol.is_comparison() {
        return false;
    }

    check_field(record, &caps[1], &symbol, &caps[3])
}

fn check_field(record: &Record, field: &str, symbol: &Symbol, literal: &str) -> bool {
    match record.get(field) {
        Some(actual) => compare(actual, symbol, &coerce_literal(literal)),
        None => false,
    }
}

fn compare(actual: &Value, symbol: &Symbol, expected: &Value) -> bool {
    let ordering = match (actual, expected) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        _ => {
            debug!(
                actual = actual.type_name(),
                expected = expected.type_name(),
                %symbol,
                "type mismatch in comparison"
            );
            return false;
        }
    };

    match symbol {
        Symbol::Greater => ordering == Ordering::Greater,
        Symbol::Less => ordering == Ordering::Less,
        Symbol::Equal => ordering == Ordering::Equal,
        _ => false,
    }
}
