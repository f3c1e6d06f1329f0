//! Lossless lexer for GLSL shader sources
//!
//! The lexer only needs enough structure to find identifiers that are safe to rewrite. It splits source into:
//! - Identifiers, pp-numbers, strings and single-character punctuation
//! - Trivia (whitespace, newlines, `//` and `/* */` comments)
//! - Preprocessor directive lines (`#version`, `#pragma`, `#define`, ...)
//!
//! Concatenating the text of every token reproduces the input exactly. Nothing is normalized or dropped.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, Span)

pub mod tokens;

pub use tokens::{Span, Token, TokenKind};

use crate::diagnostics::LexError;

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// `at_line_start` stays true until the first non-trivia token on a line.
// A `#` seen while it is true opens a directive that runs to the next
// unescaped newline.
// ============================================================================

/// Lexer for GLSL source code.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    at_line_start: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    /// Create a lexer for the body of a single directive line.
    ///
    /// The leading `#` is lexed as punctuation instead of opening another directive.
    pub fn for_directive(source: &'a str) -> Self {
        Self {
            at_line_start: false,
            ..Self::new(source)
        }
    }

    /// Tokenize the entire source.
    ///
    /// Stops at the first error; the lexer has no recovery because a filter must never emit half-rewritten text.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }
        Ok(self.tokens)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Result<(), LexError> {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return Ok(());
        };

        match c {
            ' ' | '\t' | '\x0b' | '\x0c' => {
                while matches!(self.peek(), Some(' ' | '\t' | '\x0b' | '\x0c')) {
                    self.advance();
                }
                self.add_token(TokenKind::Whitespace, start);
                return Ok(());
            }

            '\n' => {
                self.add_token(TokenKind::Newline, start);
                self.at_line_start = true;
                return Ok(());
            }

            '\r' => {
                self.match_char('\n');
                self.add_token(TokenKind::Newline, start);
                self.at_line_start = true;
                return Ok(());
            }

            '/' if self.peek() == Some('/') => {
                self.skip_to_line_end();
                self.add_token(TokenKind::LineComment, start);
                return Ok(());
            }

            // Block comments count as whitespace, so `/* x */ #define` is still a directive.
            '/' if self.peek() == Some('*') => {
                self.advance();
                self.scan_block_comment(start)?;
                self.add_token(TokenKind::BlockComment, start);
                return Ok(());
            }

            '#' if self.at_line_start => self.scan_directive(start)?,

            '"' => self.scan_string(start)?,

            '0'..='9' => self.scan_number(start),
            '.' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.scan_number(start),

            _ if is_ident_start(c) => self.scan_identifier(start),

            _ if c.is_ascii_punctuation() => self.add_token(TokenKind::Punct, start),

            _ => self.add_token(TokenKind::Other, start),
        }

        self.at_line_start = false;
        Ok(())
    }

    // ========================================================================
    // Scanners
    // ========================================================================

    /// Advance up to (not including) the next line break.
    fn skip_to_line_end(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.advance();
        }
    }

    /// Scan the rest of a `/* ... */` comment; the opening `/*` is already consumed.
    fn scan_block_comment(&mut self, start: usize) -> Result<(), LexError> {
        while let Some(c) = self.advance() {
            if c == '*' && self.match_char('/') {
                return Ok(());
            }
        }
        Err(LexError::UnterminatedBlockComment {
            span: Span::new(start, self.current_pos).into(),
        })
    }

    /// Scan a preprocessor line. Backslash-newline continues it; block comments inside it may span lines.
    ///
    /// A `//` comment ends the line, and `/*` inside a quoted string does not open a comment.
    fn scan_directive(&mut self, start: usize) -> Result<(), LexError> {
        while let Some(c) = self.peek() {
            match c {
                '\n' | '\r' => break,
                '/' if self.peek_next() == Some('/') => {
                    self.skip_to_line_end();
                    break;
                }
                '"' => {
                    self.advance();
                    self.skip_quoted();
                }
                '\\' if matches!(self.peek_next(), Some('\n' | '\r')) => {
                    self.advance();
                    if self.advance() == Some('\r') {
                        self.match_char('\n');
                    }
                }
                '/' if self.peek_next() == Some('*') => {
                    let comment_start = self.current_pos;
                    self.advance();
                    self.advance();
                    self.scan_block_comment(comment_start)?;
                }
                _ => {
                    self.advance();
                }
            }
        }
        self.add_token(TokenKind::Directive, start);
        Ok(())
    }

    /// Skip the rest of a quoted string inside a directive, stopping at the closing quote or the line end.
    ///
    /// An unclosed quote is left for the directive's consumer to reject.
    fn skip_quoted(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    self.advance();
                    return;
                }
                '\n' | '\r' => return,
                '\\' => {
                    self.advance();
                    if !matches!(self.peek(), Some('\n' | '\r') | None) {
                        self.advance();
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Scan a double-quoted string; the opening quote is already consumed. Strings may not span lines.
    fn scan_string(&mut self, start: usize) -> Result<(), LexError> {
        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    self.advance();
                    self.add_token(TokenKind::String, start);
                    return Ok(());
                }
                '\n' | '\r' => break,
                '\\' => {
                    self.advance();
                    if !matches!(self.peek(), Some('\n' | '\r') | None) {
                        self.advance();
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
        Err(LexError::UnterminatedString {
            span: Span::new(start, self.current_pos).into(),
        })
    }

    /// Scan a C pp-number: digits, letters, `_`, `.`, and a sign directly after an exponent marker.
    ///
    /// This is deliberately loose (`1.0e-3`, `0x1Fu`, `2.5lf` are all one token) so that suffixes never get
    /// mistaken for identifiers.
    fn scan_number(&mut self, start: usize) {
        let mut prev = self.source[start..self.current_pos].chars().last();
        while let Some(c) = self.peek() {
            let is_exponent_sign = matches!(c, '+' | '-') && matches!(prev, Some('e' | 'E' | 'p' | 'P'));
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || is_exponent_sign {
                self.advance();
                prev = Some(c);
            } else {
                break;
            }
        }
        self.add_token(TokenKind::Number, start);
    }

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
        self.add_token(TokenKind::Ident, start);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Lex the text of a single [`TokenKind::Directive`] token.
///
/// Spans are relative to `directive`.
pub fn lex_directive(directive: &str) -> Result<Vec<Token>, LexError> {
    Lexer::for_directive(directive).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn texts(source: &str) -> Vec<&str> {
        lex(source).unwrap().into_iter().map(|t| t.text(source)).collect()
    }

    #[test]
    fn test_declaration() {
        assert_eq!(texts("uniform mat4 mvp;"), vec!["uniform", " ", "mat4", " ", "mvp", ";"]);
        assert_eq!(
            kinds("uniform mat4 mvp;"),
            vec![
                TokenKind::Ident,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Punct,
            ]
        );
    }

    #[test]
    fn test_lossless_round_trip() {
        let source = "#version 330 core\r\n// comment vec3\n/* block\n mat4 */ vec3 a = vec3(1.0e-3, .5, 0x1Fu);\n";
        let rebuilt: String = texts(source).concat();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_spans_tile_source() {
        let source = "void main() {\n\tgl_FragColor = vec4(1.0);\n}\n";
        let tokens = lex(source).unwrap();
        let mut pos = 0;
        for token in &tokens {
            assert_eq!(token.span.start, pos);
            assert!(!token.span.is_empty());
            pos = token.span.end;
        }
        assert_eq!(pos, source.len());
    }

    #[test]
    fn test_directive_is_one_token() {
        let source = "#define SCALE(x) \\\n    ((x) * 2.0)\nfloat y;";
        let tokens = lex(source).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Directive);
        assert_eq!(tokens[0].text(source), "#define SCALE(x) \\\n    ((x) * 2.0)");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
    }

    #[test]
    fn test_indented_directive() {
        assert_eq!(kinds("  #pragma once"), vec![TokenKind::Whitespace, TokenKind::Directive]);
    }

    #[test]
    fn test_hash_mid_line_is_punct() {
        assert_eq!(kinds("a #b"), vec![
            TokenKind::Ident,
            TokenKind::Whitespace,
            TokenKind::Punct,
            TokenKind::Ident,
        ]);
    }

    #[test]
    fn test_directive_after_block_comment() {
        assert_eq!(kinds("/* c */ #define X"), vec![
            TokenKind::BlockComment,
            TokenKind::Whitespace,
            TokenKind::Directive,
        ]);
    }

    #[test]
    fn test_directive_with_multiline_comment() {
        let source = "#define X 1 /* spans\nlines */\nvec2 v;";
        let tokens = lex(source).unwrap();
        assert_eq!(tokens[0].text(source), "#define X 1 /* spans\nlines */");
    }

    #[test]
    fn test_directive_line_comment_hides_block_opener() {
        let source = "#define SCALE 2.0 // see /* note\nuniform vec3 a;\n";
        let tokens = lex(source).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Directive);
        assert_eq!(tokens[0].text(source), "#define SCALE 2.0 // see /* note");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[2].text(source), "uniform");
    }

    #[test]
    fn test_directive_string_hides_block_opener() {
        let source = "#include \"a/*b.glsl\" // x\nvec2 v;";
        let tokens = lex(source).unwrap();
        assert_eq!(tokens[0].text(source), "#include \"a/*b.glsl\" // x");
        assert_eq!(tokens[2].text(source), "vec2");
    }

    #[test]
    fn test_directive_unclosed_quote_ends_at_line() {
        let source = "#include \"a.glsl\nvec2 v;";
        let tokens = lex(source).unwrap();
        assert_eq!(tokens[0].text(source), "#include \"a.glsl");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
    }

    #[test]
    fn test_comments_are_single_tokens() {
        assert_eq!(kinds("// vec3 mat4\n"), vec![TokenKind::LineComment, TokenKind::Newline]);
        assert_eq!(kinds("/* vec3 */"), vec![TokenKind::BlockComment]);
    }

    #[test]
    fn test_numbers_swallow_suffixes() {
        assert_eq!(texts("1.0e-3+2u"), vec!["1.0e-3", "+", "2u"]);
        assert_eq!(texts(".5f"), vec![".5f"]);
        assert_eq!(texts("a.b"), vec!["a", ".", "b"]);
    }

    #[test]
    fn test_identifier_with_digits() {
        assert_eq!(texts("mat4x4 _tmp2"), vec!["mat4x4", " ", "_tmp2"]);
    }

    #[test]
    fn test_crlf_newline() {
        assert_eq!(texts("a\r\nb"), vec!["a", "\r\n", "b"]);
    }

    #[test]
    fn test_non_ascii_is_other() {
        assert_eq!(kinds("é"), vec![TokenKind::Other]);
    }

    #[test]
    fn test_string_literal() {
        let source = r#"#include "a.glsl""#;
        let tokens = lex_directive(source).unwrap();
        let strings: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::String)
            .map(|t| t.text(source))
            .collect();
        assert_eq!(strings, vec![r#""a.glsl""#]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = lex("vec3 a; /* never closed").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedBlockComment { .. }));
        assert_eq!(err.span(), Span::new(8, 23));
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex("\"abc\nvec3").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
        assert_eq!(err.span(), Span::new(0, 4));
    }

    #[test]
    fn test_empty_source() {
        assert!(lex("").unwrap().is_empty());
    }
}
