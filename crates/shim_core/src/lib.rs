//! Provide the canonical GLSL alias vocabulary shared by the shim's lexer, rewriter and header emitter.
//!
//! This crate is intentionally small and dependency-free. It answers one question: given an identifier taken
//! from shader source, should a C-oriented documentation parser see it replaced, removed, or untouched?
//!
//! ## Notes
//!
//! - This is a "vocabulary core" crate: **no IO**, no global mutable state, no tool-specific types.
//! - See [`aliases`] for the table and [`aliases::lookup`] for the lookup contract.

pub mod aliases;

pub use aliases::{AliasFamily, AliasInfo, Rewrite, lookup};
