//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::DispatchService;
use crate::config::Settings;
use crate::infrastructure::discord::DiscordConnector;
use crate::infrastructure::traits::PresenceConnector;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Presence collaborator
    pub connector: Arc<dyn PresenceConnector>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(DiscordConnector))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, connector: Arc<dyn PresenceConnector>) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            connector,
        }
    }

    /// Dispatch service bound to this container's collaborator.
    pub fn dispatch_service(&self) -> DispatchService {
        DispatchService::new(self.connector.clone(), self.settings.clone())
    }
}
