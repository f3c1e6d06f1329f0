#![forbid(unsafe_code)]
//! glsl-doc-shim: make GLSL shader sources parseable by C documentation tools
//!
//! Shader vector and matrix types (`vec3`, `mat4x2`, ...) are rewritten to `float`, and the `uniform` qualifier is
//! removed, so a C parser sees ordinary scalar declarations. The alias table itself lives in the `shim_core`
//! crate; this crate adds the lexer, the source rewriter, header generation and the CLI.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod header;
pub mod lexer;
pub mod substitute;

pub use shim_core::aliases;
pub use shim_core::{Rewrite, lookup};

pub use config::{FilterConfig, HeaderConfig};
pub use diagnostics::{LexError, ShimError};
pub use header::render_header;
pub use substitute::{Rewritten, rewrite_source, substitute_tokens};
