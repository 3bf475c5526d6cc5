use async_trait::async_trait;
use tracing::warn;

use crate::config::{DashboardConfig, FallbackPolicy};
use crate::error::AppResult;
use crate::models::consent::ConsentState;
use crate::models::privacy::{ConsentAck, RequestStatus};
use crate::models::score::{PricingExplanation, ScoreSummary};
use crate::models::session::Session;
use crate::models::trip::Trip;
use crate::services::backend_client::BackendClient;
use crate::services::fallback;

/// Every remote operation the dashboard consumes.
///
/// Implementations backed by [`DataAccessService`] under
/// [`FallbackPolicy::Substitute`] never return `Err`; callers still handle
/// the error branch so other implementations and the propagate policy work.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn driving_scores(&self, session: &Session) -> AppResult<ScoreSummary>;

    async fn trips(&self, session: &Session) -> AppResult<Vec<Trip>>;

    async fn trip_details(&self, session: &Session, trip_id: &str) -> AppResult<Option<Trip>>;

    async fn pricing_explanation(&self, policy_id: &str) -> AppResult<PricingExplanation>;

    async fn update_consent(&self, session: &Session, consent: &ConsentState)
        -> AppResult<ConsentAck>;

    async fn request_data_export(&self, session: &Session) -> AppResult<RequestStatus>;

    async fn request_data_deletion(&self, session: &Session) -> AppResult<RequestStatus>;
}

#[derive(Clone)]
pub struct DataAccessService {
    backend: BackendClient,
    policy: FallbackPolicy,
}

impl DataAccessService {
    pub fn new(backend: BackendClient, policy: FallbackPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn from_config(config: &DashboardConfig) -> AppResult<Self> {
        let backend = BackendClient::from_config(config)?;
        Ok(Self::new(backend, config.fallback_policy))
    }

    fn recover<T>(
        &self,
        result: AppResult<T>,
        operation: &'static str,
        notice: &'static str,
        fallback: impl FnOnce() -> T,
    ) -> AppResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(error) => match self.policy {
                FallbackPolicy::Substitute => {
                    warn!(
                        target: "app::api",
                        operation,
                        error = %error,
                        code = ?error.api_code(),
                        "{}",
                        notice
                    );
                    Ok(fallback())
                }
                FallbackPolicy::Propagate => Err(error),
            },
        }
    }
}

const MOCK_DATA_NOTICE: &str = "backend not available, using mock data";

#[async_trait]
impl DashboardApi for DataAccessService {
    async fn driving_scores(&self, session: &Session) -> AppResult<ScoreSummary> {
        let result = self.backend.get_driving_scores(session.user_id()).await;
        self.recover(result, "driving_scores", MOCK_DATA_NOTICE, fallback::driving_scores)
    }

    async fn trips(&self, session: &Session) -> AppResult<Vec<Trip>> {
        let result = self.backend.get_trips(session.user_id()).await;
        self.recover(result, "trips", MOCK_DATA_NOTICE, fallback::trips)
    }

    async fn trip_details(&self, session: &Session, trip_id: &str) -> AppResult<Option<Trip>> {
        let result = self
            .backend
            .get_trip_details(session.user_id(), trip_id)
            .await;
        self.recover(result, "trip_details", MOCK_DATA_NOTICE, || {
            fallback::trip_details(trip_id)
        })
    }

    async fn pricing_explanation(&self, policy_id: &str) -> AppResult<PricingExplanation> {
        let result = self.backend.get_pricing_explanation(policy_id).await;
        self.recover(
            result,
            "pricing_explanation",
            MOCK_DATA_NOTICE,
            fallback::pricing_explanation,
        )
    }

    async fn update_consent(
        &self,
        session: &Session,
        consent: &ConsentState,
    ) -> AppResult<ConsentAck> {
        let result = self.backend.post_consent(session.user_id(), consent).await;
        self.recover(
            result,
            "update_consent",
            "backend not available, consent update simulated",
            fallback::consent_ack,
        )
    }

    async fn request_data_export(&self, session: &Session) -> AppResult<RequestStatus> {
        let result = self.backend.post_data_export(session.user_id()).await;
        self.recover(
            result,
            "request_data_export",
            "backend not available, export request simulated",
            fallback::export_request,
        )
    }

    async fn request_data_deletion(&self, session: &Session) -> AppResult<RequestStatus> {
        let result = self.backend.post_data_deletion(session.user_id()).await;
        self.recover(
            result,
            "request_data_deletion",
            "backend not available, deletion request simulated",
            fallback::deletion_request,
        )
    }
}
