//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::domain::DomainError;

/// Maximum length the host application accepts for presence text fields.
pub const MAX_TEXT_LEN: usize = 128;

/// What the invocation asks the presence collaborator to do.
///
/// Closed set: anything else is rejected before a connection is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Clear presence and close the connection.
    #[default]
    Shutdown,
    /// Publish presence (player idle).
    Idle,
    /// Publish presence (player active).
    NotIdle,
}

impl Mode {
    /// All recognized modes, in CLI order.
    pub const ALL: [Mode; 3] = [Mode::Shutdown, Mode::Idle, Mode::NotIdle];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Shutdown => "shutdown",
            Mode::Idle => "idle",
            Mode::NotIdle => "not-idle",
        }
    }

    /// Whether this mode publishes a presence update.
    pub fn is_update(&self) -> bool {
        matches!(self, Mode::Idle | Mode::NotIdle)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DomainError::UnknownMode(s.to_string()))
    }
}

/// Presence start/end, unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamps {
    pub start: i64,
    pub end: Option<i64>,
}

/// Image asset keys and their hover captions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    pub large_image: String,
    pub large_text: String,
    pub small_image: String,
    pub small_text: String,
}

/// Status shown by the host application on behalf of this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
    pub state: String,
    pub details: String,
    pub timestamps: Timestamps,
    pub assets: Assets,
}

impl Presence {
    /// Check the limits the host application enforces.
    pub fn validate(&self) -> Result<(), DomainError> {
        required_text("state", &self.state)?;
        required_text("details", &self.details)?;
        bounded_text("large_image", &self.assets.large_image)?;
        bounded_text("large_text", &self.assets.large_text)?;
        bounded_text("small_image", &self.assets.small_image)?;
        bounded_text("small_text", &self.assets.small_text)?;

        if let Some(end) = self.timestamps.end {
            if end < self.timestamps.start {
                return Err(DomainError::InvalidPresence {
                    field: "end",
                    message: format!(
                        "end ({}) is before start ({})",
                        end, self.timestamps.start
                    ),
                });
            }
        }
        Ok(())
    }
}

fn required_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidPresence {
            field,
            message: "must not be empty".to_string(),
        });
    }
    bounded_text(field, value)
}

fn bounded_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(DomainError::InvalidPresence {
            field,
            message: format!("{} characters, limit is {}", len, MAX_TEXT_LEN),
        });
    }
    Ok(())
}

/// One validated invocation, built once at the argument boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    pub mode: Mode,
    /// Decoded payload. Printed, otherwise unused.
    pub payload: Value,
    /// Fully resolved presence, present for update modes only.
    pub presence: Option<Presence>,
}

/// Decode the raw payload argument.
pub fn decode_payload(raw: &str) -> Result<Value, DomainError> {
    serde_json::from_str(raw).map_err(|source| DomainError::InvalidPayload { source })
}
