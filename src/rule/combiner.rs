//! AND-folding of independently parsed rules

use crate::rule::ast::Node;

/// Join trees with AND, left-associated: `((a AND b) AND c)`.
/// No trees gives `None`; a single tree is returned unchanged.
pub fn combine<I>(trees: I) -> Option<Node>
where
    I: IntoIterator<Item = Node>,
{
    trees.into_iter().reduce(Node::and)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_empty() {
        assert_eq!(combine(Vec::new()), None);
    }

    #[test]
    fn test_combine_single() {
        let a = Node::operand("a");
        assert_eq!(combine(vec![a.clone()]), Some(a));
    }

    #[test]
    fn test_combine_left_associated() {
        let (a, b, c) = (Node::operand("a"), Node::operand("b"), Node::operand("c"));
        let combined = combine(vec![a.clone(), b.clone(), c.clone()]).unwrap();
        assert_eq!(combined, Node::and(Node::and(a, b), c));
        assert_eq!(combined.to_string(), "((a AND b) AND c)");
    }
}
