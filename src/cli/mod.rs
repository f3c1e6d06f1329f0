//! CLI module for glsl-doc-shim
//!
//! ## Commands
//!
//! - `filter <file>` - Rewrite a shader so a C documentation parser accepts it (usable as a Doxygen `INPUT_FILTER`)
//! - `header` - Emit the alias table as a force-includable C header
//! - `lookup <name>...` - Show how identifiers are rewritten
//! - `table` - List every alias
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::{FilterConfig, HeaderConfig};
use crate::diagnostics::ShimError;

// ============================================================================
// Exit status
// ============================================================================

/// Process status handed back to the shell by [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// A failed command: the text printed to stderr and the status to exit with.
#[derive(Debug)]
pub struct CliError {
    /// Printed as-is; lexing errors arrive here already rendered by miette
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    /// Failed command with status 1.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ShimError> for CliError {
    /// Render through miette so lexing errors show the offending source line.
    fn from(err: ShimError) -> Self {
        CliError::failure(format!("{:?}", miette::Report::new(err)))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Make GLSL shader sources parseable by C documentation tools
#[derive(Parser, Debug)]
#[command(name = "glsl-doc-shim")]
#[command(version = VERSION)]
#[command(about = "Make GLSL shader sources parseable by C documentation tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite a shader source, masking GLSL-only keywords
    Filter {
        /// Shader file to rewrite
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
        /// Also rewrite identifiers inside preprocessor lines
        #[arg(long)]
        rewrite_directives: bool,
        /// Keep the whitespace after an elided qualifier
        #[arg(long)]
        keep_elided_whitespace: bool,
    },

    /// Emit the alias table as a C header
    Header {
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
        /// Wrap the header in an include guard
        #[arg(long, value_name = "NAME")]
        guard: Option<String>,
        /// Extra object-like macro to define (repeatable)
        #[arg(short = 'D', long = "define", value_name = "NAME")]
        defines: Vec<String>,
        /// Omit the comment banner
        #[arg(long)]
        no_banner: bool,
    },

    /// Show how identifiers are rewritten
    Lookup {
        /// Identifiers to look up
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },

    /// List every alias
    Table,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Parse arguments, run the command, print any failure and exit with its status.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Dispatch a parsed command line to its command function.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Filter {
            file,
            output,
            rewrite_directives,
            keep_elided_whitespace,
        } => {
            let config = FilterConfig::new()
                .with_rewrite_directives(rewrite_directives)
                .with_collapse_elided_whitespace(!keep_elided_whitespace);
            commands::filter_file(&file, output.as_deref(), &config)
        }
        Command::Header {
            output,
            guard,
            defines,
            no_banner,
        } => {
            let config = HeaderConfig {
                include_guard: guard,
                predefines: defines,
                banner: !no_banner,
            };
            commands::emit_header(output.as_deref(), &config)
        }
        Command::Lookup { names } => commands::lookup_names(&names),
        Command::Table => commands::print_table(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filter_flags() {
        let cli = Cli::try_parse_from(["glsl-doc-shim", "filter", "a.glsl", "-o", "out.c", "--rewrite-directives"])
            .unwrap();
        match cli.command {
            Command::Filter {
                file,
                output,
                rewrite_directives,
                keep_elided_whitespace,
            } => {
                assert_eq!(file, PathBuf::from("a.glsl"));
                assert_eq!(output, Some(PathBuf::from("out.c")));
                assert!(rewrite_directives);
                assert!(!keep_elided_whitespace);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_repeated_defines() {
        let cli = Cli::try_parse_from(["glsl-doc-shim", "header", "-D", "SPHINX_DOCS", "--define", "X"]).unwrap();
        match cli.command {
            Command::Header { defines, .. } => assert_eq!(defines, vec!["SPHINX_DOCS", "X"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_lookup_requires_a_name() {
        assert!(Cli::try_parse_from(["glsl-doc-shim", "lookup"]).is_err());
    }

    #[test]
    fn test_lex_error_becomes_failure() {
        let source = "vec3 a; /* open";
        let lex_error = crate::lexer::lex(source).unwrap_err();
        let err = CliError::from(ShimError::lex("shader.glsl", source, lex_error));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("shader.glsl"));
        assert_eq!(err.to_string(), err.message);
    }
}
