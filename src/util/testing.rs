//! Test support: logging setup and a recording presence collaborator.

use std::io;
use std::sync::{Arc, Mutex, Once};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::Presence;
use crate::infrastructure::traits::{PresenceClient, PresenceConnector};

static TEST_SETUP: Once = Once::new();

/// Install a stderr subscriber once per test binary.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    // The IPC crate is never exercised in tests, keep its target quiet anyway
    let noisy_modules = ["discord_rich_presence"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rpresence=trace"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }
}

/// One collaborator interaction, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect(String),
    Update(Presence),
    Clear,
    Close,
}

/// Failure injection for [`RecordingConnector`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailOn {
    #[default]
    Nothing,
    Connect,
    Update,
    Clear,
    Close,
}

/// In-memory collaborator that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingConnector {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_on: FailOn,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(fail_on: FailOn) -> Self {
        Self {
            calls: Arc::default(),
            fail_on,
        }
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn fail_if(&self, on: FailOn) -> io::Result<()> {
        if self.fail_on == on {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        } else {
            Ok(())
        }
    }
}

impl PresenceConnector for RecordingConnector {
    fn connect(&self, client_id: &str) -> io::Result<Box<dyn PresenceClient>> {
        self.record(Call::Connect(client_id.to_string()));
        if self.fail_on == FailOn::Connect {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no ipc socket found",
            ));
        }
        Ok(Box::new(self.clone()))
    }
}

impl PresenceClient for RecordingConnector {
    fn update(&mut self, presence: &Presence) -> io::Result<()> {
        self.record(Call::Update(presence.clone()));
        self.fail_if(FailOn::Update)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.record(Call::Clear);
        self.fail_if(FailOn::Clear)
    }

    fn close(&mut self) -> io::Result<()> {
        self.record(Call::Close);
        self.fail_if(FailOn::Close)
    }
}

// test
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }

    #[test]
    fn given_recording_connector_when_failing_on_clear_then_records_and_errors() {
        let connector = RecordingConnector::failing_on(FailOn::Clear);
        let mut client = connector.connect("1").unwrap();
        assert!(client.clear().is_err());
        assert!(client.close().is_ok());
        assert_eq!(
            connector.calls(),
            vec![Call::Connect("1".into()), Call::Clear, Call::Close]
        );
    }
}
