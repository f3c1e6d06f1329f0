//! Configuration for the source filter and the header emitter
//!
//! Both structs are plain values with builder-style setters. The CLI maps its flags onto them.

/// Source filter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Rewrite identifiers inside preprocessor lines as well (macro names are never touched)
    pub rewrite_directives: bool,
    /// Drop the whitespace that directly follows an elided keyword
    pub collapse_elided_whitespace: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            rewrite_directives: false,
            collapse_elided_whitespace: true,
        }
    }
}

impl FilterConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rewrite_directives(mut self, enabled: bool) -> Self {
        self.rewrite_directives = enabled;
        self
    }

    pub fn with_collapse_elided_whitespace(mut self, enabled: bool) -> Self {
        self.collapse_elided_whitespace = enabled;
        self
    }
}

/// Generated header configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    /// Wrap the header in `#ifndef GUARD` / `#define GUARD` / `#endif`
    pub include_guard: Option<String>,
    /// Extra object-like macros defined before the aliases (e.g. `SPHINX_DOCS`)
    pub predefines: Vec<String>,
    /// Emit the leading comment banner
    pub banner: bool,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            include_guard: None,
            predefines: Vec::new(),
            banner: true,
        }
    }
}

impl HeaderConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include_guard(mut self, guard: impl Into<String>) -> Self {
        self.include_guard = Some(guard.into());
        self
    }

    pub fn with_predefine(mut self, name: impl Into<String>) -> Self {
        self.predefines.push(name.into());
        self
    }

    pub fn with_banner(mut self, banner: bool) -> Self {
        self.banner = banner;
        self
    }
}
