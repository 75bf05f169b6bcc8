use thiserror::Error;

use crate::context::ContextKey;

/// Errors raised while building classifier tables.
///
/// Classification itself never fails; every error here is a table
/// construction problem and surfaces before the first query is parsed.
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("invalid {key} pattern `{pattern}`: {source}")]
    InvalidPattern {
        key: ContextKey,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{key} pattern `{pattern}` must have exactly one capture group, found {found}")]
    CaptureGroups {
        key: ContextKey,
        pattern: String,
        found: usize,
    },

    #[error("{0} is a derived flag and cannot be matched by a pattern")]
    NotExtractable(ContextKey),

    #[error("invalid keyword phrase {phrase:?} for {owner}: phrases must be non-empty and lowercase")]
    InvalidPhrase { owner: String, phrase: String },

    #[error("unknown service: {0}")]
    UnknownService(String),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}
