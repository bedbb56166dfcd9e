//! Error types for entry-rewrite.
//!
//! These errors never cross a transform boundary: every transform converts
//! them into "return the original content". They surface only from the
//! configuration surface (`RuleSet::from_json`, `CleanupRule::new`) and from
//! the fallible helpers transforms are built on.

/// Error type for rewrite operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input HTML could not be parsed into a tree.
    #[error("HTML parsing failed: {0}")]
    ParseFailure(String),

    /// The tree could not be rendered back to an HTML string.
    #[error("HTML serialization failed: {0}")]
    SerializationFailure(String),

    /// Fallback extraction found zero or several candidates where exactly one was required.
    #[error("Ambiguous fallback: expected exactly one candidate, found {0}")]
    AmbiguousRecovery(usize),

    /// A rule list named a transform the registry does not know.
    #[error("Unknown transform identifier: {0}")]
    UnknownTransform(String),

    /// A cleanup rule carried a CSS selector that does not compile.
    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),

    /// Rule binding configuration could not be loaded.
    #[error("Invalid rule configuration: {0}")]
    InvalidRules(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidRules(err.to_string())
    }
}

/// Result type alias for rewrite operations.
pub type Result<T> = std::result::Result<T, Error>;
