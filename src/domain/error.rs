//! Domain-level errors (no I/O concerns)

use thiserror::Error;

/// Domain errors represent invalid invocation input.
/// These are independent of the presence collaborator.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("unknown mode '{0}' (expected one of: shutdown, idle, not-idle)")]
    UnknownMode(String),

    #[error("invalid payload JSON: {source}")]
    InvalidPayload {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid presence field '{field}': {message}")]
    InvalidPresence { field: &'static str, message: String },
}
