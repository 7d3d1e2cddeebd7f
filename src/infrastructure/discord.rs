//! Real presence collaborator backed by `discord-rich-presence`.
//!
//! The crate owns socket discovery, handshake and framing; this module only
//! maps domain values onto its activity builders.

use std::error::Error;
use std::io;

use discord_rich_presence::{activity, DiscordIpc, DiscordIpcClient};
use tracing::{debug, instrument};

use crate::domain::Presence;
use crate::infrastructure::traits::{PresenceClient, PresenceConnector};

/// Connector for the desktop chat application's local IPC endpoint.
#[derive(Debug, Default)]
pub struct DiscordConnector;

impl PresenceConnector for DiscordConnector {
    #[instrument(skip(self))]
    fn connect(&self, client_id: &str) -> io::Result<Box<dyn PresenceClient>> {
        let mut client =
            DiscordIpcClient::new(client_id).map_err(|e| ipc_err(io::ErrorKind::InvalidInput, e))?;
        client
            .connect()
            .map_err(|e| ipc_err(io::ErrorKind::NotConnected, e))?;
        debug!("handshake complete");
        Ok(Box::new(DiscordPresenceClient { client }))
    }
}

/// Connected IPC client.
pub struct DiscordPresenceClient {
    client: DiscordIpcClient,
}

impl PresenceClient for DiscordPresenceClient {
    fn update(&mut self, presence: &Presence) -> io::Result<()> {
        let mut timestamps = activity::Timestamps::new().start(presence.timestamps.start);
        if let Some(end) = presence.timestamps.end {
            timestamps = timestamps.end(end);
        }

        // Empty asset keys are omitted; the host rejects them.
        let a = &presence.assets;
        let mut assets = activity::Assets::new();
        if !a.large_image.is_empty() {
            assets = assets.large_image(&a.large_image);
        }
        if !a.large_text.is_empty() {
            assets = assets.large_text(&a.large_text);
        }
        if !a.small_image.is_empty() {
            assets = assets.small_image(&a.small_image);
        }
        if !a.small_text.is_empty() {
            assets = assets.small_text(&a.small_text);
        }

        let payload = activity::Activity::new()
            .state(&presence.state)
            .details(&presence.details)
            .timestamps(timestamps)
            .assets(assets);

        self.client
            .set_activity(payload)
            .map_err(|e| ipc_err(io::ErrorKind::Other, e))
    }

    fn clear(&mut self) -> io::Result<()> {
        self.client
            .clear_activity()
            .map_err(|e| ipc_err(io::ErrorKind::Other, e))
    }

    fn close(&mut self) -> io::Result<()> {
        self.client
            .close()
            .map_err(|e| ipc_err(io::ErrorKind::Other, e))
    }
}

/// The collaborator reports errors as non-`Send` trait objects; keep the message only.
fn ipc_err(kind: io::ErrorKind, e: Box<dyn Error>) -> io::Error {
    io::Error::new(kind, e.to_string())
}
