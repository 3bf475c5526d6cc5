use chrono::{DateTime, Utc};
use tracing::debug;

use crate::views::pricing_view::render_pricing_explanation;
use crate::views::trip_view::render_trip_detail;

use super::{AppState, CommandResult};

/// Mount the dashboard and return its markup. A failed load still renders
/// (the error view with its retry action), so this only fails on host errors.
pub async fn dashboard_render(state: &AppState, now: DateTime<Utc>) -> CommandResult<String> {
    let mut shell = state.dashboard_shell();
    let loaded = shell.mount().await.is_ready();
    debug!(target: "app::command", loaded, "dashboard mounted");
    Ok(shell.render(now))
}

pub async fn trip_detail_render(
    state: &AppState,
    trip_id: &str,
    now: DateTime<Utc>,
) -> CommandResult<String> {
    let trip = state.api().trip_details(state.session(), trip_id).await?;
    Ok(render_trip_detail(trip.as_ref(), now))
}

pub async fn pricing_render(state: &AppState, policy_id: &str) -> CommandResult<String> {
    let explanation = state.api().pricing_explanation(policy_id).await?;
    Ok(render_pricing_explanation(&explanation))
}
