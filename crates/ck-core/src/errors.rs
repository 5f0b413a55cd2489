//! Error types for curvekit.
//!
//! Every failure in the library is a permanent input defect: malformed
//! configuration, a reference to a name that was never registered, an
//! unrecognized type tag, or a numeric domain violation. There is no
//! retry path anywhere, so a single `thiserror` enum covers the whole
//! workspace.

use thiserror::Error;

/// The top-level error type used throughout curvekit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Malformed or missing configuration field.
    #[error("validation error: {0}")]
    Validation(String),

    /// A named curve / index / quote / handle was not registered.
    #[error("{kind} not found: {name}")]
    NotFound {
        /// What kind of entity was looked up ("curve", "index", ...).
        kind: &'static str,
        /// The missing key.
        name: String,
    },

    /// An unrecognized curve / index / helper type string.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A numeric or structural domain violation (non-positive tenor,
    /// reference-date mismatch, missing required discounting curve, ...).
    #[error("{0}")]
    Domain(String),

    /// The bootstrap root-finder failed to converge.
    #[error("solver failure: {0}")]
    Solver(String),

    /// An error annotated with the location it surfaced from. The
    /// underlying error keeps its class; [`root`](Error::root) unwraps it.
    #[error("{ctx}: {source}")]
    Context {
        /// Where the failure surfaced ("curve 'USD', helper #2").
        ctx: String,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Shorthand for a [`Error::NotFound`].
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Wrap the error with additional context. Used by the curve builder
    /// to add the curve name and the zero-based instrument position to
    /// factory failures.
    pub fn context(self, ctx: impl std::fmt::Display) -> Self {
        Error::Context {
            ctx: ctx.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with every context layer stripped.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Shorthand `Result` type used throughout curvekit.
pub type Result<T, E = Error> = std::result::Result<T, E>;
