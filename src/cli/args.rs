//! CLI argument definitions using clap

use clap::{ArgAction, Parser};

/// Drive a chat application's rich presence from the command line
#[derive(Parser, Debug)]
#[command(name = "rpresence")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions and exit
    #[arg(long = "completions", value_name = "SHELL", value_enum)]
    pub generator: Option<clap_complete::Shell>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    pub show_config: bool,

    #[command(flatten)]
    pub invocation: InvocationArgs,
}

/// Positional invocation contract plus presence overrides.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct InvocationArgs {
    /// shutdown | idle | not-idle
    #[arg(default_value = "shutdown")]
    pub mode: String,

    /// Presence state line
    #[arg(default_value = "state = (Idle)")]
    pub state_text: String,

    /// JSON payload, decoded and printed
    #[arg(default_value = "{}")]
    pub payload_json: String,

    /// Start timestamp, unix seconds [default: now]
    #[arg(allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// End timestamp, unix seconds [default: start + session length]
    #[arg(allow_negative_numbers = true)]
    pub end: Option<i64>,

    /// Large image asset key
    pub large_image: Option<String>,

    /// Large image hover text
    pub large_text: Option<String>,

    /// Small image asset key
    pub small_image: Option<String>,

    /// Small image hover text
    pub small_text: Option<String>,

    /// Presence details line
    #[arg(long)]
    pub details: Option<String>,

    /// Keep the connection open this many seconds after an update (ignored by shutdown)
    #[arg(long, value_name = "SECONDS", default_value_t = 0)]
    pub linger: u64,
}
