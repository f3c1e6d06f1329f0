//! Error types for lexing and file handling
//!
//! An identifier with no alias is never an error: lookup returns `None` and the token passes through. The
//! only failures are malformed input the lexer cannot tile (unterminated comments or strings) and IO.

use std::io;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::lexer::Span;

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from(span.start..span.end)
    }
}

/// Lexing failure with the byte span of the offending construct.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LexError {
    #[error("unterminated block comment")]
    #[diagnostic(code(glsl_doc_shim::lex::unterminated_comment), help("close the comment with `*/`"))]
    UnterminatedBlockComment {
        #[label("comment starts here")]
        span: SourceSpan,
    },

    #[error("unterminated string literal")]
    #[diagnostic(code(glsl_doc_shim::lex::unterminated_string), help("strings cannot span lines"))]
    UnterminatedString {
        #[label("string starts here")]
        span: SourceSpan,
    },
}

impl LexError {
    pub fn span(&self) -> Span {
        let span = match self {
            LexError::UnterminatedBlockComment { span } | LexError::UnterminatedString { span } => span,
        };
        Span::new(span.offset(), span.offset() + span.len())
    }

    /// Move the span by `by` bytes (for errors raised while lexing a slice of a larger source).
    pub fn offset(self, by: usize) -> Self {
        let span = self.span().offset(by).into();
        match self {
            LexError::UnterminatedBlockComment { .. } => LexError::UnterminatedBlockComment { span },
            LexError::UnterminatedString { .. } => LexError::UnterminatedString { span },
        }
    }
}

/// Errors surfaced by file-level operations.
#[derive(Debug, Error, Diagnostic)]
pub enum ShimError {
    #[error("cannot read `{path}`")]
    #[diagnostic(code(glsl_doc_shim::io::read))]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot write `{path}`")]
    #[diagnostic(code(glsl_doc_shim::io::write))]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("`{path}` is too large ({size} bytes, max {max} bytes)")]
    #[diagnostic(code(glsl_doc_shim::io::too_large))]
    TooLarge { path: String, size: u64, max: u64 },

    #[error("cannot lex `{path}`: {error}")]
    #[diagnostic(code(glsl_doc_shim::lex))]
    Lex {
        path: String,
        error: LexError,
        #[source_code]
        src: NamedSource<String>,
        #[label("lexing stopped here")]
        span: SourceSpan,
    },
}

impl ShimError {
    /// Attach the file name and contents to a lexing error so it renders with a source snippet.
    pub fn lex(path: impl Into<String>, source: &str, error: LexError) -> Self {
        let path = path.into();
        let span = error.span().into();
        ShimError::Lex {
            src: NamedSource::new(path.clone(), source.to_string()),
            path,
            error,
            span,
        }
    }
}
