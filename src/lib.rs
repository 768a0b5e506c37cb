//! A small regular-expression engine built on Brzozowski derivatives.
//!
//! Patterns support literals, concatenation, `|`, `*`, `( )` groups, `[...]`
//! classes without ranges, and `\` escapes. Matching works on raw bytes and
//! never builds an automaton: every input byte derives a fresh residual tree.

pub mod ast;
pub mod derive;
pub mod error;
pub mod matcher;
pub mod parser;

use log::debug;

pub use ast::{ByteSet, Node};
pub use error::{CompileError, ErrorKind};

/// A compiled pattern.
///
/// The tree is never mutated after compilation, so a `Regex` can be shared
/// between threads; each match derives its own private copy. Dropping it
/// releases the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    pattern: Vec<u8>,
    root: Node,
}

impl Regex {
    pub fn new(pattern: impl AsRef<[u8]>) -> Result<Self, CompileError> {
        compile(pattern.as_ref())
    }

    /// Whether the whole input matches.
    pub fn is_full_match(&self, input: &[u8]) -> bool {
        matcher::match_full(&self.root, input)
    }

    /// Whether some substring of the input matches.
    pub fn is_match(&self, input: &[u8]) -> bool {
        matcher::search(&self.root, input)
    }

    /// The source pattern.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pattern
    }

    pub fn ast(&self) -> &Node {
        &self.root
    }
}

pub fn compile(pattern: &[u8]) -> Result<Regex, CompileError> {
    match parser::Parser::new(pattern).parse() {
        Ok(root) => {
            debug!(
                "compiled {:?} to {root} ({} nodes)",
                pattern.escape_ascii().to_string(),
                root.size()
            );
            Ok(Regex {
                pattern: pattern.to_vec(),
                root,
            })
        }
        Err(err) => {
            debug!("failed to compile {:?}: {err}", pattern.escape_ascii().to_string());
            Err(err)
        }
    }
}

/// Like [`compile`], reporting [`ErrorKind::NullPattern`] for a missing pattern.
pub fn compile_opt(pattern: Option<&[u8]>) -> Result<Regex, CompileError> {
    match pattern {
        Some(pattern) => compile(pattern),
        None => Err(CompileError::new(ErrorKind::NullPattern, &[], 0)),
    }
}

/// Full match. A missing pattern or input is no match.
pub fn match_full(re: Option<&Regex>, input: Option<&[u8]>) -> bool {
    match (re, input) {
        (Some(re), Some(input)) => re.is_full_match(input),
        _ => false,
    }
}

/// Substring search. A missing pattern or input is no match.
pub fn search(re: Option<&Regex>, input: Option<&[u8]>) -> bool {
    match (re, input) {
        (Some(re), Some(input)) => re.is_match(input),
        _ => false,
    }
}
