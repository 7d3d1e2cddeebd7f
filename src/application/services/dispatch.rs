//! Dispatch service
//!
//! Executes one validated invocation against the presence collaborator.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, PresenceSession};
use crate::config::Settings;
use crate::domain::{DomainError, InvocationRequest, Mode, Presence};
use crate::infrastructure::traits::PresenceConnector;

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Presence cleared and connection closed.
    Cleared,
    /// Presence published.
    Updated(Presence),
}

/// Service for dispatching invocations to the presence collaborator.
pub struct DispatchService {
    connector: Arc<dyn PresenceConnector>,
    settings: Arc<Settings>,
}

impl DispatchService {
    /// Create a new dispatch service.
    pub fn new(connector: Arc<dyn PresenceConnector>, settings: Arc<Settings>) -> Self {
        Self {
            connector,
            settings,
        }
    }

    /// Connect, run the mode's operation, release the connection.
    ///
    /// `shutdown` clears then closes explicitly. Update modes publish and
    /// optionally hold the connection open for `linger`; the session guard
    /// closes it afterwards, also when the update fails.
    #[instrument(skip(self, request), fields(mode = %request.mode))]
    pub fn dispatch(
        &self,
        request: &InvocationRequest,
        linger: Duration,
    ) -> ApplicationResult<DispatchOutcome> {
        let mut session = PresenceSession::open(self.connector.as_ref(), &self.settings.client_id)?;

        match request.mode {
            Mode::Shutdown => {
                session.clear()?;
                session.close()?;
                info!("presence cleared");
                Ok(DispatchOutcome::Cleared)
            }
            Mode::Idle | Mode::NotIdle => {
                let presence = request.presence.as_ref().ok_or_else(|| {
                    DomainError::InvalidPresence {
                        field: "state",
                        message: format!("no presence resolved for mode {}", request.mode),
                    }
                })?;
                session.update(presence)?;
                info!("presence updated: {}", presence.state);

                if !linger.is_zero() {
                    debug!("holding connection for {:?}", linger);
                    std::thread::sleep(linger);
                }
                Ok(DispatchOutcome::Updated(presence.clone()))
            }
        }
    }
}
