pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use crate::cli::Cli;
use crate::commands::{AppState, CommandError};
use crate::config::DashboardConfig;

pub fn run() -> ExitCode {
    match try_run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("drivescore failed: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Configuration is loaded before the subscriber exists, so load failures
/// reach the user only through the returned error.
fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.normalize()?;

    crate::utils::logger::init_logging(&config.logging)?;

    let state = AppState::new(config, cli.interaction())?;
    info!(
        target: "app::config",
        api_base_url = %state.config().api_base_url,
        fallback_policy = ?state.config().fallback_policy,
        user_id = %state.session().user_id(),
        seeded_consent = state.config().initial_consent.is_some(),
        "configuration loaded"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let output = runtime
        .block_on(crate::cli::execute(cli.command, &state))
        .map_err(|err: CommandError| err.to_string())?;

    println!("{output}");
    Ok(())
}
