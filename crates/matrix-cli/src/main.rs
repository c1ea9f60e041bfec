//! Matrix verification CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use matrix_cli::logging::{LogConfig, LogFormat, init_logging};
use matrix_cli::render::Renderer;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod config;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_analyze, run_config, run_game, run_sources};
use crate::config::{config_path, resolve_config};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            tracing::error!(error = %error, "command failed");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli)?;
    let renderer = Renderer::new(color_enabled(cli, || io::stdout().is_terminal()));
    match &cli.command {
        Command::Analyze(args) => block_on(run_analyze(&config, args, renderer)),
        Command::Sources(args) => run_sources(&config, args, renderer),
        Command::Game(command) => block_on(run_game(&config, command, renderer)),
        Command::Config(args) => run_config(&config, &config_path(cli), args),
    }
}

/// One request at a time; a current-thread runtime is enough.
fn block_on<F: Future<Output = anyhow::Result<()>>>(future: F) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

/// `--color`, falling back to a terminal check on `auto`.
fn color_enabled(cli: &Cli, is_terminal: impl FnOnce() -> bool) -> bool {
    match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => is_terminal(),
    }
}

/// Logging settings from the global flags.
///
/// `--log-level` beats `-v`/`-q`; either one switches `RUST_LOG` off so an
/// explicit request is never silently overridden by the environment.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit_level = cli.log_level.map(|level| match level {
        LogLevelArg::Error => LevelFilter::ERROR,
        LogLevelArg::Warn => LevelFilter::WARN,
        LogLevelArg::Info => LevelFilter::INFO,
        LogLevelArg::Debug => LevelFilter::DEBUG,
        LogLevelArg::Trace => LevelFilter::TRACE,
    });
    LogConfig {
        level_filter: explicit_level.unwrap_or_else(|| cli.verbosity.tracing_level_filter()),
        use_env_filter: explicit_level.is_none() && !cli.verbosity.is_present(),
        with_ansi: color_enabled(cli, || io::stderr().is_terminal()),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        ..LogConfig::default()
    }
}
