//! Team Brain CLI entry point.

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use teambrain::cli::Cli;
use teambrain::commands;
use teambrain_core::config;

fn main() {
    // Env files first, so OPENROUTER_API_KEY and TEAMBRAIN_* are visible to clap
    config::load_env();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));
    fmt().with_env_filter(filter).with_target(false).init();

    let state_dir = cli.state_dir();
    if let Err(e) = config::ensure_dirs(&state_dir) {
        warn!(path = %state_dir.display(), error = %e, "Failed to create state directories");
    }

    if let Err(e) = commands::execute(cli.command, &state_dir) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
