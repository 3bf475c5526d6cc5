use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::models::score::ScoreSummary;
use crate::models::session::Session;
use crate::models::trip::Trip;
use crate::services::consent_panel::ConsentPanel;
use crate::services::data_access::DashboardApi;
use crate::views::score_view::render_score_panel;
use crate::views::trip_view::render_trip_history;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load dashboard data";

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Ready {
        scores: ScoreSummary,
        trips: Vec<Trip>,
    },
    Error {
        message: String,
    },
}

impl DashboardState {
    pub fn is_ready(&self) -> bool {
        matches!(self, DashboardState::Ready { .. })
    }
}

/// Top-level dashboard: loads scores and trips together and composes the
/// score, trip and privacy sections.
pub struct DashboardShell {
    api: Arc<dyn DashboardApi>,
    session: Session,
    state: DashboardState,
    privacy: ConsentPanel,
}

impl DashboardShell {
    pub fn new(api: Arc<dyn DashboardApi>, session: Session, privacy: ConsentPanel) -> Self {
        Self {
            api,
            session,
            state: DashboardState::Loading,
            privacy,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub async fn mount(&mut self) -> &DashboardState {
        self.load().await
    }

    /// Re-runs the mount fetch. In-flight work is not cancelled and repeated
    /// calls are not debounced.
    pub async fn retry(&mut self) -> &DashboardState {
        debug!(target: "app::dashboard", "retry requested");
        self.load().await
    }

    async fn load(&mut self) -> &DashboardState {
        self.state = DashboardState::Loading;

        let api = Arc::clone(&self.api);
        let joined = tokio::try_join!(api.driving_scores(&self.session), api.trips(&self.session));

        self.state = match joined {
            Ok((scores, trips)) => {
                info!(
                    target: "app::dashboard",
                    score = scores.current_score,
                    trip_count = trips.len(),
                    "dashboard data loaded"
                );
                DashboardState::Ready { scores, trips }
            }
            Err(err) => {
                error!(target: "app::dashboard", error = %err, "dashboard load failed");
                DashboardState::Error {
                    message: LOAD_FAILED_MESSAGE.to_string(),
                }
            }
        };

        &self.state
    }

    pub fn render(&self, now: DateTime<Utc>) -> String {
        match &self.state {
            DashboardState::Loading => "<div class=\"loading\"><div class=\"loading-spinner\"></div>\
                 <p>Loading your driving data...</p></div>"
                .to_string(),
            DashboardState::Error { .. } => "<div class=\"error\"><h2>Oops! Something went wrong</h2>\
                 <p>We couldn't load your dashboard right now. Please try again later.</p>\
                 <button class=\"retry-button\">Try Again</button></div>"
                .to_string(),
            DashboardState::Ready { scores, trips } => {
                let mut out = String::from(
                    "<div class=\"App\"><header class=\"App-header\"><h1>Your Driving Dashboard</h1>\
                     <p>Track your safe driving habits and see how they affect your insurance</p></header>\
                     <main class=\"App-main\"><div class=\"dashboard-grid\">",
                );
                out.push_str("<div class=\"score-section\">");
                out.push_str(&render_score_panel(
                    scores.current_score,
                    &scores.model_version,
                    &scores.top_features,
                ));
                out.push_str("</div><div class=\"trips-section\">");
                out.push_str(&render_trip_history(trips, now));
                out.push_str("</div><div class=\"privacy-section\">");
                out.push_str(&self.privacy.render());
                out.push_str("</div></div></main></div>");
                out
            }
        }
    }
}
