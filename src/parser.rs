use crate::ast::{alt, class_from_set, concat, star, ByteSet, Node};
use crate::error::{CompileError, ErrorKind};

/// Recursive-descent parser for patterns.
///
/// The `Parser` struct holds the pattern bytes and the current position.
/// Nodes are built through the smart constructors in [`crate::ast`], so the
/// tree it returns is already simplified.
pub struct Parser<'a> {
    pattern: &'a [u8],
    pos: usize,
}

/// `|`, `)` and `*` cannot start an atom. They are only special outside a class.
fn is_atom_start(b: u8) -> bool {
    !matches!(b, b'|' | b')' | b'*')
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given pattern.
    pub fn new(pattern: &'a [u8]) -> Self {
        Self { pattern, pos: 0 }
    }

    /// Peek at the next byte in the pattern without advancing.
    fn peek(&self) -> Option<u8> {
        self.pattern.get(self.pos).copied()
    }

    /// Advance the parser by one byte and return it.
    fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn error(&self, kind: ErrorKind) -> CompileError {
        CompileError::new(kind, self.pattern, self.pos)
    }

    /// Entry point for parsing a pattern.
    ///
    /// The whole input must be consumed; anything left over after the
    /// top-level alternation is an error at its offset.
    ///
    /// Example:
    /// - Pattern: `a|b` → Alt(Literal('a'), Literal('b'))
    /// - Pattern: `a)`  → UnexpectedCharacter(')') at 1
    pub fn parse(mut self) -> Result<Node, CompileError> {
        let node = self.parse_alt()?;
        match self.peek() {
            Some(b) => Err(self.error(ErrorKind::UnexpectedCharacter(b))),
            None => Ok(node),
        }
    }

    /// Parse alternation (`|`), folding branches to the left.
    ///
    /// Example:
    /// - Pattern: `a|b|c` → Alt(Alt(Literal('a'), Literal('b')), Literal('c'))
    /// - Pattern: `a|`    → Alt(Literal('a'), Epsilon)
    fn parse_alt(&mut self) -> Result<Node, CompileError> {
        let mut left = self.parse_concat()?;
        while self.peek() == Some(b'|') {
            self.advance();
            let right = self.parse_concat()?;
            left = alt(left, right);
        }
        Ok(left)
    }

    /// Parse a possibly empty sequence of unary terms.
    ///
    /// Example:
    /// - Pattern: `ab` → Concat(Literal('a'), Literal('b'))
    /// - Pattern: ``   → Epsilon
    fn parse_concat(&mut self) -> Result<Node, CompileError> {
        let mut left = Node::Epsilon;
        while self.peek().is_some_and(is_atom_start) {
            let unary = self.parse_unary()?;
            left = concat(left, unary);
        }
        Ok(left)
    }

    /// Parse an atom followed by any number of `*`.
    ///
    /// Example:
    /// - Pattern: `a**` → Star(Literal('a'))
    fn parse_unary(&mut self) -> Result<Node, CompileError> {
        let mut atom = self.parse_atom()?;
        while self.peek() == Some(b'*') {
            self.advance();
            atom = star(atom);
        }
        Ok(atom)
    }

    /// Parse a single atom: group, class, escape or literal.
    ///
    /// Examples:
    /// - Pattern: `(ab)` → Concat(Literal('a'), Literal('b'))
    /// - Pattern: `[ab]` → Class{a, b}
    /// - Pattern: `\*`   → Literal('*')
    /// - Pattern: `a`    → Literal('a')
    fn parse_atom(&mut self) -> Result<Node, CompileError> {
        match self.peek() {
            Some(b'(') => {
                self.advance();
                let inside = self.parse_alt()?;
                if self.peek() == Some(b')') {
                    self.advance();
                    Ok(inside)
                } else {
                    Err(self.error(ErrorKind::UnterminatedGroup))
                }
            }
            Some(b'[') => {
                self.advance();
                self.parse_class()
            }
            Some(b'\\') => {
                self.advance();
                self.advance()
                    .map(Node::Literal)
                    .ok_or_else(|| self.error(ErrorKind::DanglingEscape))
            }
            Some(b) if is_atom_start(b) => {
                self.advance();
                Ok(Node::Literal(b))
            }
            _ => Err(self.error(ErrorKind::ExpectedAtom)),
        }
    }

    /// Parse the members of a class, consuming up to and including `]`.
    ///
    /// Examples:
    /// - Pattern: `[abc]` → Class{a, b, c}
    /// - Pattern: `[a]`   → Literal('a')
    /// - Pattern: `[]`    → Empty
    /// - Pattern: `[\]]`  → Literal(']')
    fn parse_class(&mut self) -> Result<Node, CompileError> {
        let mut set = ByteSet::new();
        loop {
            match self.advance() {
                Some(b']') => return Ok(class_from_set(set)),
                Some(b'\\') => {
                    let b = self
                        .advance()
                        .ok_or_else(|| self.error(ErrorKind::DanglingEscape))?;
                    set.insert(b);
                }
                Some(b) => {
                    set.insert(b);
                }
                None => return Err(self.error(ErrorKind::UnterminatedClass)),
            }
        }
    }
}
