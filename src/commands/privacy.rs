use tracing::debug;

use crate::error::AppError;
use crate::models::consent::LocationPrecision;

use super::{AppState, CommandResult};

#[derive(Debug, Clone, Default)]
pub struct ConsentUpdatePayload {
    pub telematics: Option<bool>,
    pub location: Option<String>,
    pub data_retention: Option<bool>,
}

/// Apply each requested change in turn, telematics first so that turning it
/// back on in the same call unlocks the location edit. A location change
/// that would land while sharing is off is rejected before anything is sent.
pub async fn consent_update(
    state: &AppState,
    payload: ConsentUpdatePayload,
) -> CommandResult<String> {
    let location = payload
        .location
        .as_deref()
        .map(|value| LocationPrecision::try_from(value))
        .transpose()
        .map_err(AppError::validation)?;

    let mut panel = state.consent_panel();

    let sharing_after = payload
        .telematics
        .unwrap_or(panel.consent().telematics_sharing_enabled);
    if location.is_some() && !sharing_after {
        return Err(AppError::validation(
            "location precision cannot change while telematics sharing is disabled",
        )
        .into());
    }

    if let Some(enabled) = payload.telematics {
        panel.set_telematics_sharing(enabled).await?;
    }
    if let Some(precision) = location {
        panel.set_location_precision(precision).await?;
    }
    if let Some(enabled) = payload.data_retention {
        panel.set_data_retention(enabled).await?;
    }

    debug!(
        target: "app::command",
        sync_state = ?panel.sync_state(),
        "consent update finished"
    );
    Ok(panel.render())
}

pub async fn data_export_request(state: &AppState) -> CommandResult<String> {
    let mut panel = state.consent_panel();
    let outcome = panel.request_data_export().await;
    debug!(target: "app::command", ?outcome, "data export command finished");
    Ok(panel.render())
}

pub async fn data_deletion_request(state: &AppState) -> CommandResult<String> {
    let mut panel = state.consent_panel();
    let outcome = panel.request_data_deletion().await;
    debug!(target: "app::command", ?outcome, "data deletion command finished");
    Ok(panel.render())
}
