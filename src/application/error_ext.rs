//! Error conversion helpers for collaborator calls
//!
//! Provides an extension trait for attaching the failed action to an I/O error.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add action context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// client.clear().with_action_context("clear presence")?;
    /// ```
    fn with_action_context(self, action: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_action_context(self, action: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: action.to_string(),
            source: Box::new(e),
        })
    }
}
