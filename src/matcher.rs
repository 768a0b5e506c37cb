use log::trace;

use crate::ast::Node;
use crate::derive::{derive, nullable};

/// Whether the whole of `input` is in the language of `node`.
///
/// Derives a private copy of `node` by each byte in turn; only one residual
/// tree is live at a time.
pub fn match_full(node: &Node, input: &[u8]) -> bool {
    let residual = input
        .iter()
        .fold(node.clone(), |cur, &c| derive(&cur, c));
    nullable(&residual)
}

/// Whether some contiguous substring of `input` is in the language of `node`.
///
/// Tries every start offset in turn and stops at the first prefix that leaves
/// the residual nullable. Quadratic in the input length; no derivative state
/// is cached between offsets.
pub fn search(node: &Node, input: &[u8]) -> bool {
    if nullable(node) {
        return true;
    }
    (0..input.len()).any(|start| {
        trace!("search: trying offset {start}");
        matches_prefix_of(node, &input[start..])
    })
}

/// Whether some non-empty prefix of `input` is in the language of `node`.
fn matches_prefix_of(node: &Node, input: &[u8]) -> bool {
    let mut cur = node.clone();
    for &c in input {
        cur = derive(&cur, c);
        if nullable(&cur) {
            return true;
        }
        if matches!(cur, Node::Empty) {
            return false;
        }
    }
    false
}
