//! Define the GLSL alias vocabulary used to make shader sources parseable as C.
//!
//! This module is the single source of truth for masked shader keywords: a const metadata table
//! ([`ALIASES`]) that records each keyword's spelling, what it is rewritten to, and which family it
//! belongs to.
//!
//! ## Notes
//! - Lookup via [`lookup`] is **case-sensitive** (`Vec3` is not a GLSL type).
//! - The registry is **pure** (no IO, no mutation). It is a `const` slice and can be shared across threads
//!   without synchronization.
//! - Every type keyword collapses to [`SCALAR_REPLACEMENT`]. The `uniform` qualifier is elided instead.
//!
//! ## Examples
//! ```rust
//! use shim_core::aliases::{self, Rewrite};
//!
//! assert_eq!(aliases::lookup("vec3"), Some(Rewrite::Replace("float")));
//! assert_eq!(aliases::lookup("uniform"), Some(Rewrite::Elide));
//! assert_eq!(aliases::lookup("sampler2D"), None);
//! ```

/// The scalar type every masked vector/matrix keyword is rewritten to.
pub const SCALAR_REPLACEMENT: &str = "float";

/// Keywords that were considered and deliberately left unmapped.
///
/// `precision` statements (`precision highp float;`) are left for the downstream parser to reject or skip.
/// The header emitter writes these as commented-out defines.
pub const RESERVED_UNMAPPED: &[&str] = &["precision"];

/// What happens to a masked keyword.
///
/// ## Notes
/// - `Elide` is deliberately distinct from `Replace("")`: an elided token is removed from the output stream, it
///   is never substituted with a blank token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rewrite {
    /// Substitute the keyword with this token.
    Replace(&'static str),
    /// Remove the keyword entirely.
    Elide,
}

impl Rewrite {
    /// The replacement token, or `None` for elision.
    pub fn replacement(self) -> Option<&'static str> {
        match self {
            Rewrite::Replace(token) => Some(token),
            Rewrite::Elide => None,
        }
    }

    pub fn is_elide(self) -> bool {
        matches!(self, Rewrite::Elide)
    }
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Families are metadata only. They drive the grouping of the generated header and the `table` listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AliasFamily {
    /// Declaration qualifiers (`uniform`).
    Qualifier,
    /// `vecN`
    FloatVector,
    /// `uvecN`
    UnsignedVector,
    /// `ivecN`
    SignedVector,
    /// `matN` and `matNxM`
    Matrix,
}

impl AliasFamily {
    /// All families, in registry order.
    pub const ALL: &'static [AliasFamily] = &[
        AliasFamily::Qualifier,
        AliasFamily::FloatVector,
        AliasFamily::UnsignedVector,
        AliasFamily::SignedVector,
        AliasFamily::Matrix,
    ];

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            AliasFamily::Qualifier => "qualifier",
            AliasFamily::FloatVector => "float vector",
            AliasFamily::UnsignedVector => "unsigned vector",
            AliasFamily::SignedVector => "signed vector",
            AliasFamily::Matrix => "matrix",
        }
    }
}

/// Metadata for a masked keyword.
#[derive(Debug, Clone, Copy)]
pub struct AliasInfo {
    pub name: &'static str,
    pub rewrite: Rewrite,
    pub family: AliasFamily,
    /// One-line description for listings.
    pub summary: &'static str,
}

/// Registry of all masked keywords.
///
/// ## Notes
/// - Ordering matches the emitted header and is grouped by family.
/// - Names are unique; `tests/alias_registry_guardrails.rs` enforces it.
pub const ALIASES: &[AliasInfo] = &[
    elide("uniform", AliasFamily::Qualifier, "externally supplied shader input"),
    // Vectors
    scalar("vec2", AliasFamily::FloatVector, "2-component float vector"),
    scalar("vec3", AliasFamily::FloatVector, "3-component float vector"),
    scalar("vec4", AliasFamily::FloatVector, "4-component float vector"),
    scalar("uvec2", AliasFamily::UnsignedVector, "2-component unsigned integer vector"),
    scalar("uvec3", AliasFamily::UnsignedVector, "3-component unsigned integer vector"),
    scalar("uvec4", AliasFamily::UnsignedVector, "4-component unsigned integer vector"),
    scalar("ivec2", AliasFamily::SignedVector, "2-component signed integer vector"),
    scalar("ivec3", AliasFamily::SignedVector, "3-component signed integer vector"),
    scalar("ivec4", AliasFamily::SignedVector, "4-component signed integer vector"),
    // Matrices
    scalar("mat2", AliasFamily::Matrix, "2x2 float matrix"),
    scalar("mat2x2", AliasFamily::Matrix, "2x2 float matrix"),
    scalar("mat2x3", AliasFamily::Matrix, "2-column, 3-row float matrix"),
    scalar("mat2x4", AliasFamily::Matrix, "2-column, 4-row float matrix"),
    scalar("mat3", AliasFamily::Matrix, "3x3 float matrix"),
    scalar("mat3x2", AliasFamily::Matrix, "3-column, 2-row float matrix"),
    scalar("mat3x3", AliasFamily::Matrix, "3x3 float matrix"),
    scalar("mat3x4", AliasFamily::Matrix, "3-column, 4-row float matrix"),
    scalar("mat4", AliasFamily::Matrix, "4x4 float matrix"),
    scalar("mat4x2", AliasFamily::Matrix, "4-column, 2-row float matrix"),
    scalar("mat4x3", AliasFamily::Matrix, "4-column, 3-row float matrix"),
    scalar("mat4x4", AliasFamily::Matrix, "4x4 float matrix"),
];

/// Look up the rewrite for an identifier.
///
/// ## Parameters
/// - `name`: Candidate identifier spelling.
///
/// ## Returns
/// - `Some(Rewrite)` if `name` is a masked keyword.
/// - `None` otherwise; callers pass the token through unchanged.
pub fn lookup(name: &str) -> Option<Rewrite> {
    info(name).map(|a| a.rewrite)
}

/// Full metadata for an identifier, if it is masked.
pub fn info(name: &str) -> Option<&'static AliasInfo> {
    ALIASES.iter().find(|a| a.name == name)
}

pub fn is_alias(name: &str) -> bool {
    info(name).is_some()
}

/// Iterate the entries of one family, in registry order.
pub fn entries_in(family: AliasFamily) -> impl Iterator<Item = &'static AliasInfo> {
    ALIASES.iter().filter(move |a| a.family == family)
}

const fn scalar(name: &'static str, family: AliasFamily, summary: &'static str) -> AliasInfo {
    AliasInfo {
        name,
        rewrite: Rewrite::Replace(SCALAR_REPLACEMENT),
        family,
        summary,
    }
}

const fn elide(name: &'static str, family: AliasFamily, summary: &'static str) -> AliasInfo {
    AliasInfo {
        name,
        rewrite: Rewrite::Elide,
        family,
        summary,
    }
}
