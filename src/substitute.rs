//! Apply the alias table to token sequences and whole shader sources
//!
//! Only identifier tokens are ever looked up. Comments and strings pass through untouched, and directive lines
//! do too unless [`FilterConfig::rewrite_directives`] is set.
//!
//! The replacement token is never itself an alias, so rewriting already-rewritten text changes nothing.

use shim_core::aliases::{self, Rewrite};

use crate::config::FilterConfig;
use crate::diagnostics::LexError;
use crate::lexer::{self, TokenKind};

/// Directives whose first argument is a macro name that must keep its spelling.
const MACRO_NAME_DIRECTIVES: &[&str] = &["define", "undef", "ifdef", "ifndef"];

/// Apply the table to a sequence of already-split tokens.
///
/// Aliased types are replaced, elided qualifiers are removed, and every other token is copied unchanged.
///
/// ```rust
/// use glsl_doc_shim::substitute::substitute_tokens;
///
/// assert_eq!(substitute_tokens(&["uniform", "mat4", "x", ";"]), vec!["float", "x", ";"]);
/// ```
pub fn substitute_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .filter_map(|token| {
            let token: &str = token.as_ref();
            match aliases::lookup(token) {
                Some(Rewrite::Replace(replacement)) => Some(replacement.to_string()),
                Some(Rewrite::Elide) => None,
                None => Some(token.to_string()),
            }
        })
        .collect()
}

/// Result of rewriting a source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rewritten {
    pub text: String,
    /// Number of type keywords replaced
    pub replaced: usize,
    /// Number of qualifier keywords removed
    pub elided: usize,
}

impl Rewritten {
    /// `true` if the output differs from the input.
    pub fn changed(&self) -> bool {
        self.replaced > 0 || self.elided > 0
    }
}

/// Lex `source` and rewrite every aliased identifier.
///
/// ## Errors
///
/// Returns the lexer's error if the source contains an unterminated block comment or string. Nothing is written
/// in that case.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn rewrite_source(source: &str, config: &FilterConfig) -> Result<Rewritten, LexError> {
    let tokens = lexer::lex(source)?;
    let mut emitter = Emitter::new(source.len(), config.collapse_elided_whitespace);

    for token in &tokens {
        let text = token.text(source);
        match token.kind {
            TokenKind::Ident => emitter.ident(text),
            TokenKind::Directive if config.rewrite_directives => {
                rewrite_directive(text, &mut emitter).map_err(|e| e.offset(token.span.start))?
            }
            TokenKind::Whitespace => emitter.whitespace(text),
            _ => emitter.verbatim(text),
        }
    }

    let out = emitter.finish();
    tracing::debug!(replaced = out.replaced, elided = out.elided, "rewrote shader source");
    Ok(out)
}

/// Rewrite the identifiers of one directive line, keeping the directive name and any macro name it introduces
/// or tests (`#define vec3 ...`, `#ifdef uniform`, `defined(mat4)`).
fn rewrite_directive(directive: &str, emitter: &mut Emitter) -> Result<(), LexError> {
    let tokens = lexer::lex_directive(directive)?;
    let mut directive_name: Option<&str> = None;
    let mut protect_next = false;

    for token in &tokens {
        let text = token.text(directive);
        match token.kind {
            TokenKind::Ident if directive_name.is_none() => {
                directive_name = Some(text);
                protect_next = MACRO_NAME_DIRECTIVES.contains(&text);
                emitter.verbatim(text);
            }
            TokenKind::Ident if protect_next => {
                protect_next = false;
                emitter.verbatim(text);
            }
            TokenKind::Ident => {
                protect_next = text == "defined";
                emitter.ident(text);
            }
            TokenKind::Whitespace => emitter.whitespace(text),
            _ => emitter.verbatim(text),
        }
    }
    Ok(())
}

/// `true` if writing `next` directly after `prev` could fuse them into one token (`b/` + `*c` opens a comment).
fn fuses(prev: char, next: char) -> bool {
    let word = |c: char| c.is_alphanumeric() || c == '_';
    let punct = |c: char| c.is_ascii_punctuation() && c != '_';
    (word(prev) && word(next)) || (punct(prev) && punct(next)) || (prev == '.' && next.is_ascii_digit())
}

/// Output buffer that tracks the gap left by an elided keyword.
///
/// With collapsing on, the whitespace after an elision is swallowed. A single space is written back only when the
/// tokens on either side of the gap would otherwise fuse.
struct Emitter {
    out: Rewritten,
    collapse_after_elide: bool,
    /// An elision happened and nothing has been written since.
    after_elide: bool,
}

impl Emitter {
    fn new(capacity: usize, collapse_after_elide: bool) -> Self {
        Self {
            out: Rewritten {
                text: String::with_capacity(capacity),
                ..Rewritten::default()
            },
            collapse_after_elide,
            after_elide: false,
        }
    }

    fn ident(&mut self, text: &str) {
        match aliases::lookup(text) {
            Some(Rewrite::Replace(replacement)) => {
                self.out.replaced += 1;
                self.verbatim(replacement);
            }
            Some(Rewrite::Elide) => {
                self.out.elided += 1;
                self.after_elide = true;
            }
            None => self.verbatim(text),
        }
    }

    fn whitespace(&mut self, text: &str) {
        if self.after_elide && self.collapse_after_elide {
            return;
        }
        self.after_elide = false;
        self.out.text.push_str(text);
    }

    fn verbatim(&mut self, text: &str) {
        if std::mem::take(&mut self.after_elide) {
            if let (Some(prev), Some(next)) = (self.out.text.chars().next_back(), text.chars().next()) {
                if fuses(prev, next) {
                    self.out.text.push(' ');
                }
            }
        }
        self.out.text.push_str(text);
    }

    fn finish(self) -> Rewritten {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(source: &str) -> String {
        rewrite_source(source, &FilterConfig::default()).unwrap().text
    }

    #[test]
    fn test_token_sequence_scenario() {
        assert_eq!(substitute_tokens(&["uniform", "mat4", "x", ";"]), vec!["float", "x", ";"]);
    }

    #[test]
    fn test_tokens_pass_through() {
        let tokens = vec!["float".to_string(), "sampler2D".to_string(), "myVariable".to_string()];
        assert_eq!(substitute_tokens(&tokens), tokens);
    }

    #[test]
    fn test_uniform_declaration() {
        assert_eq!(rewrite("uniform mat4 mvp;"), "float mvp;");
    }

    #[test]
    fn test_keep_whitespace_after_elision() {
        let config = FilterConfig::new().with_collapse_elided_whitespace(false);
        let out = rewrite_source("uniform mat4 mvp;", &config).unwrap();
        assert_eq!(out.text, " float mvp;");
    }

    #[test]
    fn test_function_signature() {
        assert_eq!(
            rewrite("vec4 shade(vec3 n, mat3x4 m, ivec2 px) {"),
            "float shade(float n, float m, float px) {"
        );
    }

    #[test]
    fn test_constructor_calls() {
        assert_eq!(rewrite("vec2 uv = vec2(0.5, 1.0);"), "float uv = float(0.5, 1.0);");
    }

    #[test]
    fn test_counts() {
        let out = rewrite_source("uniform vec3 a;\nuniform uvec4 b;\nfloat c;", &FilterConfig::default()).unwrap();
        assert_eq!(out.replaced, 2);
        assert_eq!(out.elided, 2);
        assert!(out.changed());
        assert_eq!(out.text, "float a;\nfloat b;\nfloat c;");
    }

    #[test]
    fn test_unchanged_source() {
        let source = "float f(float x) { return x * 2.0; }\n";
        let out = rewrite_source(source, &FilterConfig::default()).unwrap();
        assert!(!out.changed());
        assert_eq!(out.text, source);
    }

    #[test]
    fn test_comments_untouched() {
        let source = "// uniform vec3 here\n/* mat4 */ vec3 a;";
        assert_eq!(rewrite(source), "// uniform vec3 here\n/* mat4 */ float a;");
    }

    #[test]
    fn test_identifiers_containing_aliases_untouched() {
        assert_eq!(rewrite("float vec3_len; float uniforms; float myvec2;"), "float vec3_len; float uniforms; float myvec2;");
    }

    #[test]
    fn test_member_access_and_swizzles() {
        assert_eq!(rewrite("vec3 p = v.xyz;"), "float p = v.xyz;");
    }

    #[test]
    fn test_precision_untouched() {
        assert_eq!(rewrite("precision highp float;"), "precision highp float;");
    }

    #[test]
    fn test_directives_untouched_by_default() {
        let source = "#define COLOR vec3(1.0)\nvec3 c = COLOR;";
        assert_eq!(rewrite(source), "#define COLOR vec3(1.0)\nfloat c = COLOR;");
    }

    #[test]
    fn test_directive_rewriting() {
        let config = FilterConfig::new().with_rewrite_directives(true);
        let source = "#define COLOR vec3(1.0)\n#define vec3 dvec3\n#if defined(mat4) && FOO\n#pragma SSV pixel mat2 x\n";
        let out = rewrite_source(source, &config).unwrap();
        assert_eq!(
            out.text,
            "#define COLOR float(1.0)\n#define vec3 dvec3\n#if defined(mat4) && FOO\n#pragma SSV pixel float x\n"
        );
    }

    #[test]
    fn test_directive_elision_keeps_line_shape() {
        let config = FilterConfig::new().with_rewrite_directives(true);
        let out = rewrite_source("#define U uniform vec3\n", &config).unwrap();
        assert_eq!(out.text, "#define U float\n");
    }

    #[test]
    fn test_directive_error_is_offset() {
        let config = FilterConfig::new().with_rewrite_directives(true);
        let err = rewrite_source("vec3 a;\n#include \"x.glsl\n", &config).unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
        assert_eq!(err.span().start, 17);
    }

    #[test]
    fn test_lex_error_propagates() {
        let err = rewrite_source("vec3 a; /*", &FilterConfig::default()).unwrap_err();
        assert!(matches!(err, LexError::UnterminatedBlockComment { .. }));
    }

    #[test]
    fn test_directive_comment_with_block_opener() {
        let source = "#define SCALE 2.0 // see /* note\nuniform vec3 a;\n";
        assert_eq!(rewrite(source), "#define SCALE 2.0 // see /* note\nfloat a;\n");

        let source = "#define OLD 1 // old /* x\nuniform vec3 a;\n/* */ vec2 b;\n";
        assert_eq!(rewrite(source), "#define OLD 1 // old /* x\nfloat a;\n/* */ float b;\n");
    }

    #[test]
    fn test_directive_comment_with_block_opener_rewritten() {
        let config = FilterConfig::new().with_rewrite_directives(true);
        let out = rewrite_source("#define V vec3 // see /* note\nvec2 b;\n", &config).unwrap();
        assert_eq!(out.text, "#define V float // see /* note\nfloat b;\n");
    }

    #[test]
    fn test_elision_does_not_fuse_neighbours() {
        let once = rewrite("float a = b/uniform *c;\n");
        assert_eq!(once, "float a = b/ *c;\n");
        assert_eq!(rewrite(&once), once);

        assert_eq!(rewrite("float a = b/uniform*c;\n"), "float a = b/ *c;\n");
        assert_eq!(rewrite("int i = j-uniform -k;\n"), "int i = j- -k;\n");
    }

    #[test]
    fn test_elision_collapses_beside_delimiters() {
        assert_eq!(rewrite("void f(uniform vec3 a) {}"), "void f(float a) {}");
        assert_eq!(rewrite("x = uniform\n;"), "x = \n;");
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let source = "uniform  mat4x3 m;\r\nuniform\tvec2 v; // uniform\nvoid main() { ivec3 i = ivec3(0); }\n";
        let once = rewrite(source);
        assert_eq!(rewrite(&once), once);
    }
}
