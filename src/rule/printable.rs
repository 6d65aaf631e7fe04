//! Printable form of a rule tree
//!
//! Operands print bare; operators print fully parenthesized as
//! `(left OP right)`, or `(left OP)` when the right operand is absent. This
//! text is what gets persisted.

use crate::rule::ast::{Node, Symbol};
use std::fmt;

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Operand(value) => f.write_str(value),
            Node::Operator {
                symbol,
                left,
                right: Some(right),
            } => write!(f, "({} {} {})", left, symbol, right),
            Node::Operator {
                symbol,
                left,
                right: None,
            } => write!(f, "({} {})", left, symbol),
        }
    }
}

/// Render a tree in printable form
pub fn to_printable(node: &Node) -> String {
    node.to_string()
}

/// Rebuild a tree from its printable form.
///
/// Text wrapped in parentheses is split into at most three fields on
/// whitespace outside nested parentheses and quotes. A connective with no
/// field before it has an empty left operand. A connective closing the group
/// has an absent right operand, or an empty one when whitespace separates it
/// from the `)`. Anything else that does not read as `left OP right` is an
/// operand.
pub fn from_printable(text: &str) -> Node {
    let text = text.trim();
    let raw = match text
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(raw) => raw,
        None => return Node::operand(text),
    };
    let inner = raw.trim();
    let connective = |field: &str| Symbol::from_text(field).is_connective();
    let trailing = || raw.ends_with(char::is_whitespace).then(|| Node::operand(""));

    match split_top_level(inner, 3).as_slice() {
        [left, symbol, right] => Node::operator(
            Symbol::from_text(symbol),
            from_printable(left),
            Some(from_printable(right)),
        ),
        [symbol, right] if connective(symbol) => Node::operator(
            Symbol::from_text(symbol),
            Node::operand(""),
            Some(from_printable(right)),
        ),
        [left, symbol] if connective(symbol) => {
            Node::operator(Symbol::from_text(symbol), from_printable(left), trailing())
        }
        [symbol] if connective(symbol) => {
            Node::operator(Symbol::from_text(symbol), Node::operand(""), trailing())
        }
        _ => Node::operand(inner),
    }
}

/// Split on whitespace runs at nesting depth zero, producing at most `limit`
/// fields; the last field keeps the rest of the text.
fn split_top_level(text: &str, limit: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(limit);
    let mut depth = 0usize;
    let mut quoted = false;
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\'' => quoted = !quoted,
            '(' if !quoted => depth += 1,
            ')' if !quoted => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && !quoted && depth == 0 && fields.len() + 1 < limit => {
                fields.push(&text[start..i]);
                while chars.next_if(|&(_, next)| next.is_whitespace()).is_some() {}
                start = chars.peek().map_or(text.len(), |&(j, _)| j);
            }
            _ => {}
        }
    }

    if start < text.len() {
        fields.push(&text[start..]);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::parser::parse;
    use crate::rule::tokenizer::tokenize;

    #[test]
    fn test_to_printable() {
        let ast = parse(tokenize("age > 30")).unwrap();
        assert_eq!(to_printable(&ast), "(age > 30)");

        let ast = parse(tokenize(
            "((age > 30 AND department = 'Sales') OR (age < 25 AND department = 'Marketing'))",
        ))
        .unwrap();
        assert_eq!(
            to_printable(&ast),
            "(((age > 30) AND (department = 'Sales')) OR ((age < 25) AND (department = 'Marketing')))"
        );
    }

    #[test]
    fn test_to_printable_absent_right() {
        let ast = parse(tokenize("OR age > 30")).unwrap();
        assert_eq!(to_printable(&ast), "((age > 30) OR)");
    }

    #[test]
    fn test_from_printable_operand() {
        assert_eq!(from_printable("age"), Node::operand("age"));
        assert_eq!(from_printable("  age > 30 "), Node::operand("age > 30"));
        assert_eq!(from_printable("(age)"), Node::operand("age"));
        assert_eq!(from_printable(""), Node::operand(""));
    }

    #[test]
    fn test_from_printable_structural_round_trip() {
        for rule in [
            "age > 30",
            "department = 'Human Resources'",
            "((age > 30 AND department = 'Sales') OR (age < 25 AND department = 'Marketing'))",
            "age > 1 AND age > 2 AND age > 3",
            "AND age > 30",
            "OR age > 30 department = 'x y'",
            // empty operands around connectives
            "() OR age > 30",
            "OR",
            "AND ()",
            "OR () ()",
            "age > 30 OR ()",
            "(() AND age > 30) OR department = 'Sales'",
        ] {
            let ast = parse(tokenize(rule)).unwrap();
            assert_eq!(from_printable(&to_printable(&ast)), ast, "rule: {}", rule);
        }
    }

    #[test]
    fn test_from_printable_empty_operands() {
        assert_eq!(
            from_printable("( OR (age > 30))"),
            Node::or(Node::operand(""), Node::comparison("age", Symbol::Greater, "30"))
        );
        assert_eq!(
            from_printable("( OR)"),
            Node::operator(Symbol::Or, Node::operand(""), None)
        );
        assert_eq!(
            from_printable("( OR )"),
            Node::or(Node::operand(""), Node::operand(""))
        );
        assert_eq!(
            from_printable("(x OR )"),
            Node::or(Node::operand("x"), Node::operand(""))
        );
        assert_eq!(
            from_printable("(x OR)"),
            Node::operator(Symbol::Or, Node::operand("x"), None)
        );
    }

    #[test]
    fn test_from_printable_unrecognized_operator() {
        assert_eq!(
            from_printable("(a XOR b)"),
            Node::operator(
                Symbol::Unrecognized("XOR".to_string()),
                Node::operand("a"),
                Some(Node::operand("b"))
            )
        );
        // Two fields without a connective stay an operand
        assert_eq!(from_printable("(a b)"), Node::operand("a b"));
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(
            split_top_level("(a > 1) AND (b = 'x y')", 3),
            vec!["(a > 1)", "AND", "(b = 'x y')"]
        );
        assert_eq!(split_top_level("a  >   b c d", 3), vec!["a", ">", "b c d"]);
        assert_eq!(split_top_level("'x y' OR", 3), vec!["'x y'", "OR"]);
        assert!(split_top_level("", 3).is_empty());
    }
}
