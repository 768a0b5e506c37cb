//! Brzozowski derivatives over [`Node`] trees.
//!
//! Both walks recurse over pattern structure, so stack depth grows with the
//! nesting and concatenation length of the compiled pattern and never with
//! the input length.

use crate::ast::{alt, concat, star, Node};

/// Whether the empty string is in the language of `node`.
pub fn nullable(node: &Node) -> bool {
    match node {
        Node::Empty | Node::Literal(_) | Node::Class(_) => false,
        Node::Epsilon | Node::Star(_) => true,
        Node::Alt(a, b) => nullable(a) || nullable(b),
        Node::Concat(a, b) => nullable(a) && nullable(b),
    }
}

/// The residual pattern matching what may follow `c`.
///
/// `node` is left untouched. Any operand reused in the result is deep-copied
/// so the returned tree shares nothing with its input.
pub fn derive(node: &Node, c: u8) -> Node {
    match node {
        Node::Empty | Node::Epsilon => Node::Empty,
        Node::Literal(b) => {
            if *b == c {
                Node::Epsilon
            } else {
                Node::Empty
            }
        }
        Node::Class(set) => {
            if set.contains(c) {
                Node::Epsilon
            } else {
                Node::Empty
            }
        }
        // d(A|B) = dA | dB
        Node::Alt(a, b) => alt(derive(a, c), derive(b, c)),
        // d(AB) = dA·B | (nullable(A) ? dB : ∅)
        Node::Concat(a, b) => {
            let term = concat(derive(a, c), (**b).clone());
            if nullable(a) {
                alt(term, derive(b, c))
            } else {
                term
            }
        }
        // d(A*) = dA·A*
        Node::Star(a) => concat(derive(a, c), star((**a).clone())),
    }
}
