use thiserror::Error;

/// Bytes of pattern shown on each side of the failure point.
const CONTEXT_RADIUS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("pattern is missing")]
    NullPattern,
    #[error("unexpected character '{}'", .0.escape_ascii())]
    UnexpectedCharacter(u8),
    #[error("expected atom")]
    ExpectedAtom,
    #[error("expected ')'")]
    UnterminatedGroup,
    #[error("unterminated character class (missing ']')")]
    UnterminatedClass,
    #[error("dangling escape at end of pattern")]
    DanglingEscape,
}

/// A pattern that failed to compile, with the byte offset of the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at pos {offset}: {kind}\ncontext: \"{context}\"")]
pub struct CompileError {
    kind: ErrorKind,
    offset: usize,
    context: String,
}

impl CompileError {
    pub(crate) fn new(kind: ErrorKind, pattern: &[u8], offset: usize) -> Self {
        let start = offset.saturating_sub(CONTEXT_RADIUS);
        let end = (offset + CONTEXT_RADIUS).min(pattern.len());
        let context = String::from_utf8_lossy(&pattern[start.min(end)..end]).into_owned();
        Self {
            kind,
            offset,
            context,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The pattern text around the failure point.
    pub fn context(&self) -> &str {
        &self.context
    }
}
