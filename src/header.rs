//! Render the alias table as a C header of object-like macros
//!
//! Documentation tools that run a real C preprocessor (libclang-based autodoc, for instance) can force-include
//! the generated header instead of piping sources through the filter:
//!
//! ```text
//! clang -xc -DSPHINX_DOCS -include glsl_support.h shader.glsl
//! ```

use shim_core::aliases::{self, AliasFamily, Rewrite, RESERVED_UNMAPPED};

use crate::config::HeaderConfig;

/// Render the header. Output is deterministic and ends with a newline.
pub fn render_header(config: &HeaderConfig) -> String {
    let mut sections: Vec<Vec<String>> = Vec::new();

    if config.banner {
        sections.push(vec![
            "// Generated by glsl-doc-shim. Do not edit.".to_string(),
            "//".to_string(),
            "// Minimal GLSL type definitions so C documentation tools can parse shader sources.".to_string(),
        ]);
    }

    if let Some(guard) = &config.include_guard {
        sections.push(vec![format!("#ifndef {guard}"), format!("#define {guard}")]);
    }

    if !config.predefines.is_empty() {
        sections.push(config.predefines.iter().map(|name| format!("#define {name}")).collect());
    }

    for &family in AliasFamily::ALL {
        let mut lines: Vec<String> = aliases::entries_in(family).map(|entry| define_line(entry.name, entry.rewrite)).collect();
        if family == AliasFamily::Qualifier {
            lines.extend(RESERVED_UNMAPPED.iter().map(|name| format!("//#define {name}")));
        }
        sections.push(lines);
    }

    if let Some(guard) = &config.include_guard {
        sections.push(vec![format!("#endif // {guard}")]);
    }

    let mut out = sections
        .iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');
    out
}

fn define_line(name: &str, rewrite: Rewrite) -> String {
    match rewrite {
        Rewrite::Replace(replacement) => format!("#define {name} {replacement}"),
        Rewrite::Elide => format!("#define {name}"),
    }
}
