//! Error types for parsing, loading, and compilation.
//!
//! Compilation errors are always local to one pattern definition: the
//! registry never caches a partial automaton, and a failure compiling a
//! referenced pattern surfaces as a failure of the referencing one.

use remac_core::Span;

/// Errors surfaced by `Registry::compile`.
///
/// Each variant names the pattern whose compilation failed and, where
/// applicable, the identifier that caused it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A reference did not resolve to any definition.
    #[error("pattern `{pattern}`: unresolved reference `{name}`")]
    UnresolvedReference { pattern: String, name: String },

    /// A reference matched more than one candidate across unqualified
    /// imports. Never silently picks one.
    #[error("pattern `{pattern}`: ambiguous reference `{name}`")]
    AmbiguousReference { pattern: String, name: String },

    /// A constant range with `lo > hi`.
    #[error("pattern `{pattern}`: malformed range {lo}..{hi}")]
    MalformedRange { pattern: String, lo: u32, hi: u32 },

    /// An alternation with no branches.
    #[error("pattern `{pattern}`: empty alternation")]
    EmptyAlternation { pattern: String },
}

/// Errors produced while parsing one source file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected `{found}` at {span}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        span: Span,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("integer literal out of range at {span}")]
    IntOutOfRange { span: Span },

    #[error("invalid escape sequence at {span}")]
    InvalidEscape { span: Span },

    #[error("repeat bounds {{{min},{max}}} are reversed at {span}")]
    ReversedBounds { min: u32, max: u32, span: Span },

    #[error("`{name}` is defined twice at {span}")]
    DuplicateDefinition { name: String, span: Span },
}

/// Errors produced while loading a module graph from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read `{path}`: {message}")]
    Io { path: String, message: String },

    #[error("parse error in `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },
}
