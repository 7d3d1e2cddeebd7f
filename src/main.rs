use std::io;
use std::process;

use clap::{Command, CommandFactory, Parser};
use clap_complete::{generate, Generator};
use rpresence::cli::{execute_command, output, Cli};
use rpresence::config::Settings;
use rpresence::exitcode;
use rpresence::infrastructure::di::ServiceContainer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn main() {
    let cli = Cli::parse();

    if let Some(generator) = cli.generator {
        let mut cmd = Cli::command();
        eprintln!("Generating completion file for {generator:?}...");
        print_completions(generator, &mut cmd);
        process::exit(exitcode::OK);
    }

    setup_logging(cli.verbose);

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&e);
            process::exit(exitcode::CONFIG);
        }
    };
    let container = ServiceContainer::new(settings);

    let mut stdout = io::stdout().lock();
    if let Err(e) = execute_command(&cli, &container, &mut stdout) {
        tracing::debug!("error details: {:?}", e);
        output::error(&e);
        process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            output::warning("Don't be crazy, max is -v -v -v");
            LevelFilter::TRACE
        }
    };

    // Silence the IPC crate below debug
    let noisy_modules = ["discord_rich_presence"];
    let module_filter = filter_fn(move |metadata| {
        verbosity >= 3
            || !noisy_modules
                .iter()
                .any(|name| metadata.target().starts_with(name))
    });

    // RUST_LOG, when set, wins over -v
    let env_filter = EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(env_filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
