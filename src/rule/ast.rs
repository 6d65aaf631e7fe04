//! Abstract Syntax Tree for rule expressions

use std::fmt;

/// AST node for rule expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Leaf: a field name, a literal, or a whole `field OP value` fragment
    Operand(String),
    /// Connective or comparison over its children
    Operator {
        symbol: Symbol,
        left: Box<Node>,
        /// Absent only when a connective had nothing to its right
        right: Option<Box<Node>>,
    },
}

/// Operator symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// Logical AND
    And,
    /// Logical OR
    Or,
    /// Greater than (>)
    Greater,
    /// Less than (<)
    Less,
    /// Equal (=)
    Equal,
    /// Any other text found in operator position, kept verbatim
    Unrecognized(String),
}

impl Symbol {
    /// Map operator text to a symbol. Only the canonical spellings are recognized.
    pub fn from_text(text: &str) -> Self {
        match text {
            "AND" => Symbol::And,
            "OR" => Symbol::Or,
            ">" => Symbol::Greater,
            "<" => Symbol::Less,
            "=" => Symbol::Equal,
            other => Symbol::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Symbol::And => "AND",
            Symbol::Or => "OR",
            Symbol::Greater => ">",
            Symbol::Less => "<",
            Symbol::Equal => "=",
            Symbol::Unrecognized(text) => text,
        }
    }

    #[inline]
    pub fn is_connective(&self) -> bool {
        matches!(self, Symbol::And | Symbol::Or)
    }

    #[inline]
    pub fn is_comparison(&self) -> bool {
        matches!(self, Symbol::Greater | Symbol::Less | Symbol::Equal)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    pub fn operand(value: impl Into<String>) -> Self {
        Node::Operand(value.into())
    }

    pub fn operator(symbol: Symbol, left: Node, right: Option<Node>) -> Self {
        Node::Operator {
            symbol,
            left: Box::new(left),
            right: right.map(Box::new),
        }
    }

    /// `field symbol value`, with the value kept exactly as written
    pub fn comparison(field: impl Into<String>, symbol: Symbol, value: impl Into<String>) -> Self {
        Node::operator(symbol, Node::operand(field), Some(Node::operand(value)))
    }

    pub fn and(left: Node, right: Node) -> Self {
        Node::operator(Symbol::And, left, Some(right))
    }

    pub fn or(left: Node, right: Node) -> Self {
        Node::operator(Symbol::Or, left, Some(right))
    }

    /// Operator symbol, or `None` for operands
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Node::Operand(_) => None,
            Node::Operator { symbol, .. } => Some(symbol),
        }
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match self {
            Node::Operand(_) => 1,
            Node::Operator { left, right, .. } => {
                1 + left.node_count() + right.as_ref().map_or(0, |r| r.node_count())
            }
        }
    }
}
