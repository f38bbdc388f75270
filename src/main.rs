//! cwctl CLI entry point.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use cwctl::cli::{Cli, CommandDispatcher};
use cwctl::config::ConfigPaths;
use cwctl::ui::{OutputMode, TerminalUI, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("cwctl=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cwctl=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("cwctl starting with args: {:?}", cli);

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let mut ui = TerminalUI::new(OutputMode::from_flags(cli.json, cli.quiet));

    let paths = cli
        .config_dir
        .clone()
        .map(ConfigPaths::new)
        .unwrap_or_else(ConfigPaths::discover);
    let dispatcher = CommandDispatcher::new(paths, Duration::from_secs(cli.timeout));

    match dispatcher.dispatch(&cli, &mut ui) {
        Ok(result) => ExitCode::from(result.exit_code),
        Err(e) => {
            if cli.json {
                ui.data(&e.to_json());
            } else {
                ui.error(&format!("Error: {}", e));
            }
            ExitCode::from(1)
        }
    }
}
