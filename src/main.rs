//! Basecamp CLI entry point.

use std::process::ExitCode;

use basecamp::cli::{Cli, CommandDispatcher};
use basecamp::interrupt;
use basecamp::platform::is_ci;
use basecamp::ui::{create_ui, OutputMode};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Log filter: --debug wins, then RUST_LOG, then info
    let filter = match (cli.debug, EnvFilter::try_from_default_env()) {
        (true, _) => EnvFilter::new("basecamp=debug"),
        (false, Ok(from_env)) => from_env,
        (false, Err(_)) => EnvFilter::new("basecamp=info"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    tracing::debug!("Starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    let project_root = match &cli.project {
        Some(root) => root.clone(),
        None => std::env::current_dir().unwrap_or_default(),
    };

    let mut ui = create_ui(!is_ci(), output_mode);

    // Turn Ctrl-C into a flag the blocking steps can observe
    let interrupt = interrupt::install();

    let dispatcher = CommandDispatcher::new(project_root, cli.python.clone(), interrupt);
    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
