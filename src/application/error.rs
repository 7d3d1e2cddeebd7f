//! Application-level errors (wraps domain errors)

use std::io;

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add collaborator context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("presence host unavailable for client {client_id} (is the chat application running?): {source}")]
    Unavailable {
        client_id: String,
        #[source]
        source: io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("{context}: {source}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
