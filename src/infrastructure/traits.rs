//! I/O boundary traits for testability
//!
//! These traits abstract the presence collaborator, allowing services
//! to be tested with a recording implementation.

use std::io;

use crate::domain::Presence;

/// An open connection to the chat application's presence endpoint.
pub trait PresenceClient {
    /// Publish presence.
    fn update(&mut self, presence: &Presence) -> io::Result<()>;

    /// Remove any presence previously published by this client.
    fn clear(&mut self) -> io::Result<()>;

    /// Close the connection. The client is not used afterwards.
    fn close(&mut self) -> io::Result<()>;
}

/// Opens presence connections.
pub trait PresenceConnector: Send + Sync {
    /// Handshake with the chat application as `client_id`.
    fn connect(&self, client_id: &str) -> io::Result<Box<dyn PresenceClient>>;
}
