//! Token types for the GLSL lexer.
//!
//! Tokens carry no owned text. Every token is a [`Span`] into the source it was lexed from, and the spans of a
//! token stream tile the source exactly, so the stream can be written back out byte for byte.

/// Byte range into the lexed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shift a span lexed from a sub-slice back into the coordinates of the enclosing source.
    pub fn offset(self, by: usize) -> Span {
        Span::new(self.start + by, self.end + by)
    }
}

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Code ==========
    Ident,
    Number,
    /// Double-quoted string (only seen in directives and extension syntax).
    String,
    /// Single ASCII punctuation character.
    Punct,

    // ========== Trivia ==========
    /// Run of spaces, tabs, form feeds or vertical tabs.
    Whitespace,
    /// `\n`, `\r\n` or a lone `\r`.
    Newline,
    LineComment,
    BlockComment,

    // ========== Preprocessor ==========
    /// A whole `#...` line, including backslash continuations. The trailing newline is not part of it.
    Directive,

    /// Anything else (non-ASCII, stray control characters).
    Other,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The token's text within `source`.
    ///
    /// `source` must be the string the token was lexed from.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end]
    }
}
