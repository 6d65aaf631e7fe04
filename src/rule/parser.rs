//! Rule parser
//!
//! Precedence, tightest first: comparisons, `AND`, `OR`. Both connectives are
//! left-associative.
//!
//! ```text
//! expr     := and_expr ( OR and_expr )*
//! and_expr := primary ( AND primary )*
//! primary  := '(' expr ')'
//!           | CONNECTIVE primary [primary]
//!           | FIELD CMP VALUE
//!           | any other token
//! ```
//!
//! The parser never fails. Fragments it cannot read cleanly become operand
//! leaves, which evaluate to false, and are reported as [`ParseAmbiguity`].
//! A connective with nothing to its right gets an absent right operand,
//! which evaluates as true.

use crate::rule::ast::{Node, Symbol};
use crate::rule::tokenizer::Token;
use std::collections::VecDeque;
use std::fmt;
use tracing::warn;

/// Fields that form structured comparisons
pub const FIELDS: [&str; 2] = ["age", "department"];

/// A fragment the parser absorbed leniently
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAmbiguity {
    pub message: String,
}

impl fmt::Display for ParseAmbiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Parse result with the diagnostics collected on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    /// `None` when there were no tokens
    pub root: Option<Node>,
    pub ambiguities: Vec<ParseAmbiguity>,
}

/// Parse a token queue into an AST
pub fn parse(tokens: impl Into<VecDeque<Token>>) -> Option<Node> {
    parse_with_diagnostics(tokens).root
}

/// Parse a token queue into an AST, keeping the ambiguity diagnostics
pub fn parse_with_diagnostics(tokens: impl Into<VecDeque<Token>>) -> ParseOutcome {
    let mut parser = Parser {
        tokens: tokens.into(),
        ambiguities: Vec::new(),
    };
    let root = parser.parse_root();

    for ambiguity in &parser.ambiguities {
        warn!(%ambiguity, "lenient parse");
    }

    ParseOutcome {
        root,
        ambiguities: parser.ambiguities,
    }
}

struct Parser {
    tokens: VecDeque<Token>,
    ambiguities: Vec<ParseAmbiguity>,
}

impl Parser {
    fn parse_root(&mut self) -> Option<Node> {
        if self.tokens.is_empty() {
            return None;
        }

        let root = self.parse_or();

        if !self.tokens.is_empty() {
            let rest = self
                .tokens
                .iter()
                .map(Token::text)
                .collect::<Vec<_>>()
                .join(" ");
            self.ambiguity(format!("Trailing tokens ignored: {}", rest));
        }

        Some(root)
    }

    fn parse_or(&mut self) -> Node {
        let mut left = self.parse_and();
        while matches!(self.tokens.front(), Some(Token::Or)) {
            self.tokens.pop_front();
            let right = self.parse_right_operand(Symbol::Or, Self::parse_and);
            left = Node::operator(Symbol::Or, left, right);
        }
        left
    }

    fn parse_and(&mut self) -> Node {
        let mut left = self.parse_primary();
        while matches!(self.tokens.front(), Some(Token::And)) {
            self.tokens.pop_front();
            let right = self.parse_right_operand(Symbol::And, Self::parse_primary);
            left = Node::operator(Symbol::And, left, right);
        }
        left
    }

    fn parse_right_operand(
        &mut self,
        symbol: Symbol,
        operand: fn(&mut Self) -> Node,
    ) -> Option<Node> {
        if self.starts_primary() {
            Some(operand(self))
        } else {
            self.ambiguity(format!("`{}` has no right operand", symbol));
            None
        }
    }

    fn parse_primary(&mut self) -> Node {
        match self.tokens.pop_front() {
            None => {
                self.ambiguity("Expected an expression, found end of rule");
                Node::operand("")
            }
            Some(Token::CloseParen) => {
                // left for the enclosing group to close
                self.tokens.push_front(Token::CloseParen);
                self.ambiguity("Expected an expression, found `)`");
                Node::operand("")
            }
            Some(Token::OpenParen) => {
                let inner = self.parse_or();
                if matches!(self.tokens.front(), Some(Token::CloseParen)) {
                    self.tokens.pop_front();
                } else {
                    self.ambiguity("Missing closing parenthesis");
                }
                inner
            }
            Some(Token::And) => self.parse_prefix(Symbol::And),
            Some(Token::Or) => self.parse_prefix(Symbol::Or),
            Some(Token::Identifier(name)) => self.parse_field(name),
            Some(other) => {
                self.ambiguity(format!("Unexpected `{}`", other));
                Node::operand(other.text())
            }
        }
    }

    /// `AND left [right]` written before its operands
    fn parse_prefix(&mut self, symbol: Symbol) -> Node {
        let left = self.parse_primary();
        let right = if self.starts_primary() {
            Some(self.parse_primary())
        } else {
            None
        };
        Node::operator(symbol, left, right)
    }

    /// An identifier, which is a comparison when it names an allowed field
    /// followed by `>`, `<` or `=` and a value
    fn parse_field(&mut self, name: String) -> Node {
        let symbol = match self.tokens.front() {
            Some(Token::Comparison(op)) => Symbol::from_text(op),
            _ => {
                self.ambiguity(format!("Bare operand `{}`", name));
                return Node::Operand(name);
            }
        };

        if !FIELDS.contains(&name.as_str()) {
            self.ambiguity(format!("`{}` is not a comparable field", name));
            return Node::Operand(name);
        }

        let value = match self.tokens.get(1) {
            Some(Token::Identifier(v) | Token::Literal(v)) if symbol.is_comparison() => v.clone(),
            _ => {
                self.ambiguity(format!("Incomplete comparison after `{}`", name));
                return Node::Operand(name);
            }
        };

        self.tokens.drain(..2);
        Node::comparison(name, symbol, value)
    }

    fn starts_primary(&self) -> bool {
        matches!(
            self.tokens.front(),
            Some(t) if !matches!(t, Token::CloseParen | Token::And | Token::Or)
        )
    }

    fn ambiguity(&mut self, message: impl Into<String>) {
        self.ambiguities.push(ParseAmbiguity {
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::tokenizer::tokenize;

    fn parse_str(rule: &str) -> Node {
        parse(tokenize(rule)).unwrap()
    }

    fn cmp(field: &str, symbol: Symbol, value: &str) -> Node {
        Node::comparison(field, symbol, value)
    }

    #[test]
    fn test_parse_simple_comparison() {
        assert_eq!(parse_str("age > 30"), cmp("age", Symbol::Greater, "30"));
        assert_eq!(
            parse_str("department = 'Sales'"),
            cmp("department", Symbol::Equal, "'Sales'")
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(Vec::new()), None);
    }

    #[test]
    fn test_parse_nested_parentheses() {
        let ast = parse_str(
            "((age > 30 AND department = 'Sales') OR (age < 25 AND department = 'Marketing'))",
        );
        let expected = Node::or(
            Node::and(
                cmp("age", Symbol::Greater, "30"),
                cmp("department", Symbol::Equal, "'Sales'"),
            ),
            Node::and(
                cmp("age", Symbol::Less, "25"),
                cmp("department", Symbol::Equal, "'Marketing'"),
            ),
        );
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_parse_operator_precedence() {
        // AND binds tighter than OR
        let ast = parse_str("age > 50 OR age > 30 AND department = 'Sales'");
        let expected = Node::or(
            cmp("age", Symbol::Greater, "50"),
            Node::and(
                cmp("age", Symbol::Greater, "30"),
                cmp("department", Symbol::Equal, "'Sales'"),
            ),
        );
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_parse_left_associative() {
        let ast = parse_str("age > 1 AND age > 2 AND age > 3");
        let expected = Node::and(
            Node::and(cmp("age", Symbol::Greater, "1"), cmp("age", Symbol::Greater, "2")),
            cmp("age", Symbol::Greater, "3"),
        );
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_parse_prefix_connective() {
        let ast = parse_str("AND age > 30 department = 'Sales'");
        assert_eq!(
            ast,
            Node::and(
                cmp("age", Symbol::Greater, "30"),
                cmp("department", Symbol::Equal, "'Sales'")
            )
        );
    }

    #[test]
    fn test_parse_prefix_without_right_operand() {
        let outcome = parse_with_diagnostics(tokenize("AND age > 30"));
        assert_eq!(
            outcome.root,
            Some(Node::operator(
                Symbol::And,
                cmp("age", Symbol::Greater, "30"),
                None
            ))
        );
        assert!(outcome.ambiguities.is_empty());
    }

    #[test]
    fn test_parse_trailing_connective() {
        let outcome = parse_with_diagnostics(tokenize("age > 30 AND"));
        assert_eq!(
            outcome.root,
            Some(Node::operator(
                Symbol::And,
                cmp("age", Symbol::Greater, "30"),
                None
            ))
        );
        assert_eq!(outcome.ambiguities.len(), 1);
    }

    #[test]
    fn test_parse_unknown_field_is_operand() {
        let outcome = parse_with_diagnostics(tokenize("salary > 1000"));
        assert_eq!(outcome.root, Some(Node::operand("salary")));
        // not a comparable field, then trailing `> 1000`
        assert_eq!(outcome.ambiguities.len(), 2);
    }

    #[test]
    fn test_parse_incomplete_comparison() {
        let outcome = parse_with_diagnostics(tokenize("age >"));
        assert_eq!(outcome.root, Some(Node::operand("age")));
        assert!(!outcome.ambiguities.is_empty());

        let outcome = parse_with_diagnostics(tokenize("age >> 30"));
        assert_eq!(outcome.root, Some(Node::operand("age")));
        assert!(!outcome.ambiguities.is_empty());
    }

    #[test]
    fn test_parse_missing_close_paren() {
        let outcome = parse_with_diagnostics(tokenize("(age > 30"));
        assert_eq!(outcome.root, Some(cmp("age", Symbol::Greater, "30")));
        assert_eq!(outcome.ambiguities.len(), 1);
    }

    #[test]
    fn test_parse_stray_close_paren() {
        let outcome = parse_with_diagnostics(tokenize("age > 30)"));
        assert_eq!(outcome.root, Some(cmp("age", Symbol::Greater, "30")));
        assert_eq!(outcome.ambiguities.len(), 1);
    }

    #[test]
    fn test_parse_empty_parens() {
        let outcome = parse_with_diagnostics(tokenize("()"));
        assert_eq!(outcome.root, Some(Node::operand("")));
        assert_eq!(outcome.ambiguities.len(), 1);
    }

    #[test]
    fn test_parse_bare_connective() {
        let outcome = parse_with_diagnostics(tokenize("OR"));
        assert_eq!(
            outcome.root,
            Some(Node::operator(Symbol::Or, Node::operand(""), None))
        );
        assert_eq!(outcome.ambiguities.len(), 1);

        let outcome = parse_with_diagnostics(tokenize("() OR age > 30"));
        assert_eq!(
            outcome.root,
            Some(Node::or(Node::operand(""), cmp("age", Symbol::Greater, "30")))
        );
        assert_eq!(outcome.ambiguities.len(), 1);
    }

    #[test]
    fn test_parse_literal_value_kept_verbatim() {
        let ast = parse_str("department = 'Human Resources'");
        assert_eq!(ast, cmp("department", Symbol::Equal, "'Human Resources'"));
    }
}
