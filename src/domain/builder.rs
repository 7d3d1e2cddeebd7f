//! Presence builder: resolves optional overrides against defaults.

use crate::domain::entities::{Assets, Presence, Timestamps};
use crate::domain::error::DomainError;

/// Result type for presence construction.
pub type BuildResult<T> = Result<T, DomainError>;

/// Assembles a [`Presence`] from defaults plus per-invocation overrides.
///
/// Overrides passed as `None` keep the default. Timestamps are resolved in
/// [`PresenceBuilder::build`]: `start` falls back to `now`, `end` to
/// `start + session_secs` (open-ended when `session_secs` is zero).
#[derive(Debug, Clone)]
pub struct PresenceBuilder {
    state: String,
    details: String,
    start: Option<i64>,
    end: Option<i64>,
    session_secs: u64,
    assets: Assets,
}

impl PresenceBuilder {
    pub fn new(state: impl Into<String>, details: impl Into<String>, assets: Assets) -> Self {
        Self {
            state: state.into(),
            details: details.into(),
            start: None,
            end: None,
            session_secs: 0,
            assets,
        }
    }

    pub fn session_secs(mut self, secs: u64) -> Self {
        self.session_secs = secs;
        self
    }

    pub fn details(mut self, details: Option<String>) -> Self {
        if let Some(d) = details {
            self.details = d;
        }
        self
    }

    pub fn start(mut self, start: Option<i64>) -> Self {
        self.start = start.or(self.start);
        self
    }

    pub fn end(mut self, end: Option<i64>) -> Self {
        self.end = end.or(self.end);
        self
    }

    pub fn large_image(mut self, v: Option<String>) -> Self {
        if let Some(v) = v {
            self.assets.large_image = v;
        }
        self
    }

    pub fn large_text(mut self, v: Option<String>) -> Self {
        if let Some(v) = v {
            self.assets.large_text = v;
        }
        self
    }

    pub fn small_image(mut self, v: Option<String>) -> Self {
        if let Some(v) = v {
            self.assets.small_image = v;
        }
        self
    }

    pub fn small_text(mut self, v: Option<String>) -> Self {
        if let Some(v) = v {
            self.assets.small_text = v;
        }
        self
    }

    /// Resolve timestamps against `now` (unix seconds) and validate.
    pub fn build(self, now: i64) -> BuildResult<Presence> {
        let start = self.start.unwrap_or(now);
        let end = match (self.end, self.session_secs) {
            (Some(end), _) => Some(end),
            (None, 0) => None,
            (None, secs) => {
                let secs = i64::try_from(secs).map_err(|_| DomainError::InvalidPresence {
                    field: "end",
                    message: format!("session length {} out of range", secs),
                })?;
                Some(start.saturating_add(secs))
            }
        };

        let presence = Presence {
            state: self.state,
            details: self.details,
            timestamps: Timestamps { start, end },
            assets: self.assets,
        };
        presence.validate()?;
        Ok(presence)
    }
}
