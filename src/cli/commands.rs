//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use shim_core::aliases::{self, Rewrite};

use crate::config::{FilterConfig, HeaderConfig};
use crate::diagnostics::ShimError;
use crate::header::render_header;
use crate::substitute::rewrite_source;

use super::{CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Shaders are small; anything larger is almost certainly the wrong file.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(path: &Path) -> Result<String, ShimError> {
    let display = path.display().to_string();
    let metadata = fs::metadata(path).map_err(|source| ShimError::Read {
        path: display.clone(),
        source,
    })?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(ShimError::TooLarge {
            path: display,
            size: metadata.len(),
            max: MAX_SOURCE_SIZE,
        });
    }

    fs::read_to_string(path).map_err(|source| ShimError::Read { path: display, source })
}

/// Write `text` to `output`, or to stdout when no path is given.
fn write_output(output: Option<&Path>, text: &str) -> Result<(), ShimError> {
    match output {
        Some(path) => fs::write(path, text).map_err(|source| ShimError::Write {
            path: path.display().to_string(),
            source,
        }),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

/// Rewrite a shader file.
pub fn filter_file(file: &Path, output: Option<&Path>, config: &FilterConfig) -> CliResult<ExitCode> {
    let source = read_source(file)?;
    let rewritten = rewrite_source(&source, config).map_err(|e| ShimError::lex(file.display().to_string(), &source, e))?;

    if !rewritten.changed() {
        tracing::info!(file = %file.display(), "no GLSL keywords to mask");
    }

    write_output(output, &rewritten.text)?;
    Ok(ExitCode::SUCCESS)
}

/// Emit the C header.
pub fn emit_header(output: Option<&Path>, config: &HeaderConfig) -> CliResult<ExitCode> {
    write_output(output, &render_header(config))?;
    Ok(ExitCode::SUCCESS)
}

/// Describe how one identifier is rewritten, e.g. `vec3 -> float`.
pub fn describe(name: &str) -> String {
    match aliases::lookup(name) {
        Some(Rewrite::Replace(replacement)) => format!("{name} -> {replacement}"),
        Some(Rewrite::Elide) => format!("{name} -> (elided)"),
        None => format!("{name} -> (unchanged)"),
    }
}

/// Print the rewrite of every name, one per line.
pub fn lookup_names(names: &[String]) -> CliResult<ExitCode> {
    for name in names {
        println!("{}", describe(name));
    }
    Ok(ExitCode::SUCCESS)
}

/// Render the alias listing printed by `table`.
pub fn format_table() -> String {
    let width = aliases::ALIASES.iter().map(|a| a.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in aliases::ALIASES {
        let target = entry.rewrite.replacement().unwrap_or("(elided)");
        out.push_str(&format!(
            "{:<width$}  {:<8}  {:<15}  {}\n",
            entry.name,
            target,
            entry.family.label(),
            entry.summary,
        ));
    }
    out
}

pub fn print_table() -> CliResult<ExitCode> {
    print!("{}", format_table());
    Ok(ExitCode::SUCCESS)
}
