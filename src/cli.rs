use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::commands::dashboard::{dashboard_render, pricing_render, trip_detail_render};
use crate::commands::privacy::{
    consent_update, data_deletion_request, data_export_request, ConsentUpdatePayload,
};
use crate::commands::terminal::TerminalInteraction;
use crate::commands::{AppState, CommandResult};
use crate::config::DashboardConfig;

#[derive(Debug, Parser)]
#[command(name = "drivescore")]
#[command(about = "Driving score dashboard client")]
pub struct Cli {
    /// YAML configuration file; defaults to config/{CONFIG_ENV}.yml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub user: Option<String>,
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load scores and trips and print the dashboard markup.
    Dashboard,
    Trip {
        trip_id: String,
    },
    Pricing {
        policy_id: String,
    },
    /// Change consent choices; each given flag is pushed separately.
    Consent {
        #[arg(long)]
        telematics: Option<bool>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        retention: Option<bool>,
    },
    Export,
    Delete {
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

impl Cli {
    /// CLI flags win over file and environment settings.
    pub fn apply_to(&self, config: &mut DashboardConfig) {
        if let Some(user) = &self.user {
            config.user_id = user.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.api_base_url = base_url.clone();
        }
    }

    pub fn assume_yes(&self) -> bool {
        matches!(self.command, Command::Delete { yes: true })
    }

    pub fn interaction(&self) -> Arc<TerminalInteraction> {
        Arc::new(TerminalInteraction::new(self.assume_yes()))
    }
}

pub async fn execute(command: Command, state: &AppState) -> CommandResult<String> {
    let now = Utc::now();
    match command {
        Command::Dashboard => dashboard_render(state, now).await,
        Command::Trip { trip_id } => trip_detail_render(state, &trip_id, now).await,
        Command::Pricing { policy_id } => pricing_render(state, &policy_id).await,
        Command::Consent {
            telematics,
            location,
            retention,
        } => {
            consent_update(
                state,
                ConsentUpdatePayload {
                    telematics,
                    location,
                    data_retention: retention,
                },
            )
            .await
        }
        Command::Export => data_export_request(state).await,
        Command::Delete { .. } => data_deletion_request(state).await,
    }
}
