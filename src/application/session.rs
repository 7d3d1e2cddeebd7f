//! Scoped presence connection
//!
//! A [`PresenceSession`] owns one collaborator connection and closes it
//! exactly once: explicitly via [`PresenceSession::close`], or on drop.

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::Presence;
use crate::infrastructure::traits::{PresenceClient, PresenceConnector};

pub struct PresenceSession {
    client_id: String,
    client: Option<Box<dyn PresenceClient>>,
}

impl PresenceSession {
    /// Connect to the chat application as `client_id`.
    #[instrument(skip(connector))]
    pub fn open(connector: &dyn PresenceConnector, client_id: &str) -> ApplicationResult<Self> {
        let client = connector
            .connect(client_id)
            .map_err(|source| ApplicationError::Unavailable {
                client_id: client_id.to_string(),
                source,
            })?;
        debug!("session open");
        Ok(Self {
            client_id: client_id.to_string(),
            client: Some(client),
        })
    }

    pub fn update(&mut self, presence: &Presence) -> ApplicationResult<()> {
        debug!("update: state={:?} details={:?}", presence.state, presence.details);
        self.client()?
            .update(presence)
            .with_action_context("update presence")
    }

    pub fn clear(&mut self) -> ApplicationResult<()> {
        debug!("clear");
        self.client()?.clear().with_action_context("clear presence")
    }

    /// Close now and report the outcome. Drop will not close again.
    pub fn close(mut self) -> ApplicationResult<()> {
        match self.client.take() {
            Some(mut client) => {
                debug!("close: client_id={}", self.client_id);
                client.close().with_action_context("close presence connection")
            }
            None => Ok(()),
        }
    }

    fn client(&mut self) -> ApplicationResult<&mut (dyn PresenceClient + 'static)> {
        match self.client.as_mut() {
            Some(client) => Ok(client.as_mut()),
            None => Err(ApplicationError::OperationFailed {
                context: "presence session".to_string(),
                source: "connection already closed".into(),
            }),
        }
    }
}

impl Drop for PresenceSession {
    fn drop(&mut self) {
        if let Some(mut client) = self.client.take() {
            debug!("close on drop");
            if let Err(e) = client.close() {
                warn!("closing presence connection ({}) failed: {}", self.client_id, e);
            }
        }
    }
}
