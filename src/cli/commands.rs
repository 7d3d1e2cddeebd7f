//! Command execution
//!
//! parse → default → decode → dispatch → invoke. Everything that can be
//! rejected is rejected in [`build_request`], before a connection is opened.

use std::io::Write;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::application::services::DispatchOutcome;
use crate::cli::args::{Cli, InvocationArgs};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{decode_payload, InvocationRequest, Mode, PresenceBuilder};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run one invocation. The decoded payload is written to `out`.
pub fn execute_command(
    cli: &Cli,
    container: &ServiceContainer,
    out: &mut dyn Write,
) -> CliResult<()> {
    if cli.show_config {
        let toml = container.settings.to_toml()?;
        write!(out, "{}", toml).map_err(|e| InfraError::io("write settings", e))?;
        return Ok(());
    }

    let now = chrono::Utc::now().timestamp();
    let request = build_request(&cli.invocation, &container.settings, now)?;
    print_payload(out, &request.payload)?;

    let linger = Duration::from_secs(cli.invocation.linger);
    if !request.mode.is_update() && !linger.is_zero() {
        warn!("--linger has no effect in {} mode", request.mode);
    }
    let outcome = container.dispatch_service().dispatch(&request, linger)?;
    match outcome {
        DispatchOutcome::Cleared => output::success("presence cleared"),
        DispatchOutcome::Updated(presence) => {
            output::success(&format!("presence updated ({})", request.mode));
            output::detail(&presence.state);
            output::detail(&presence.details);
        }
    }
    Ok(())
}

/// Validate arguments once and resolve every default.
///
/// `now` (unix seconds) is the fallback start timestamp.
#[instrument(skip(settings))]
pub fn build_request(
    args: &InvocationArgs,
    settings: &Settings,
    now: i64,
) -> CliResult<InvocationRequest> {
    let mode: Mode = args.mode.parse()?;
    let payload = decode_payload(&args.payload_json)?;

    let presence = if mode.is_update() {
        let presence = PresenceBuilder::new(
            args.state_text.clone(),
            settings.details.clone(),
            settings.assets(),
        )
        .session_secs(settings.session_secs)
        .details(args.details.clone())
        .start(args.start)
        .end(args.end)
        .large_image(args.large_image.clone())
        .large_text(args.large_text.clone())
        .small_image(args.small_image.clone())
        .small_text(args.small_text.clone())
        .build(now)?;
        Some(presence)
    } else {
        None
    };

    debug!("request: mode={} presence={:?}", mode, presence);
    Ok(InvocationRequest {
        mode,
        payload,
        presence,
    })
}

/// Write the payload as one line of compact JSON.
pub fn print_payload(out: &mut dyn Write, payload: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, payload)
        .map_err(|e| InfraError::io("write payload", e.into()))?;
    writeln!(out).map_err(|e| InfraError::io("write payload", e))?;
    Ok(())
}
