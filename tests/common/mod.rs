#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use drivescore_dashboard_lib::error::{ApiErrorCode, AppError, AppResult};
use drivescore_dashboard_lib::models::consent::ConsentState;
use drivescore_dashboard_lib::models::privacy::{ConsentAck, RequestState, RequestStatus};
use drivescore_dashboard_lib::models::score::{PricingExplanation, ScoreSummary};
use drivescore_dashboard_lib::models::session::Session;
use drivescore_dashboard_lib::models::trip::Trip;
use drivescore_dashboard_lib::services::data_access::DashboardApi;
use drivescore_dashboard_lib::services::fallback;
use drivescore_dashboard_lib::services::interaction::{Notice, UserInteraction};

/// In-memory [`DashboardApi`] that records calls and fails on request.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<&'static str>>,
    consent_payloads: Mutex<Vec<ConsentState>>,
    pub fail_scores: AtomicBool,
    pub fail_trips: AtomicBool,
    pub fail_consent: AtomicBool,
    pub fail_export: AtomicBool,
    pub fail_deletion: AtomicBool,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == operation)
            .count()
    }

    pub fn consent_payloads(&self) -> Vec<ConsentState> {
        self.consent_payloads.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, fail: &AtomicBool) -> AppResult<()> {
        self.calls.lock().unwrap().push(operation);
        if fail.load(Ordering::SeqCst) {
            Err(AppError::other(format!("{operation} blew up")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn driving_scores(&self, _session: &Session) -> AppResult<ScoreSummary> {
        self.record("driving_scores", &self.fail_scores)?;
        Ok(ScoreSummary {
            current_score: 84.0,
            model_version: "fake-model".to_string(),
            top_features: Vec::new(),
        })
    }

    async fn trips(&self, _session: &Session) -> AppResult<Vec<Trip>> {
        self.record("trips", &self.fail_trips)?;
        Ok(fallback::trips())
    }

    async fn trip_details(&self, _session: &Session, trip_id: &str) -> AppResult<Option<Trip>> {
        self.calls.lock().unwrap().push("trip_details");
        Ok(fallback::trip_details(trip_id))
    }

    async fn pricing_explanation(&self, _policy_id: &str) -> AppResult<PricingExplanation> {
        self.calls.lock().unwrap().push("pricing_explanation");
        Err(AppError::api(ApiErrorCode::NotFound, "no such policy"))
    }

    async fn update_consent(
        &self,
        _session: &Session,
        consent: &ConsentState,
    ) -> AppResult<ConsentAck> {
        self.consent_payloads.lock().unwrap().push(consent.clone());
        self.record("update_consent", &self.fail_consent)?;
        Ok(ConsentAck {
            status: RequestState::Success,
            message: "ok".to_string(),
        })
    }

    async fn request_data_export(&self, _session: &Session) -> AppResult<RequestStatus> {
        self.record("request_data_export", &self.fail_export)?;
        Ok(RequestStatus {
            status: RequestState::Queued,
            request_id: Some("exp-1".to_string()),
            message: "Export queued".to_string(),
        })
    }

    async fn request_data_deletion(&self, _session: &Session) -> AppResult<RequestStatus> {
        self.record("request_data_deletion", &self.fail_deletion)?;
        Ok(RequestStatus {
            status: RequestState::Queued,
            request_id: Some("del-1".to_string()),
            message: "Deletion queued".to_string(),
        })
    }
}

/// Records notices and answers confirmations with a fixed reply.
pub struct ScriptedInteraction {
    accept: bool,
    notices: Mutex<Vec<Notice>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInteraction {
    pub fn accepting() -> Self {
        Self::new(true)
    }

    pub fn declining() -> Self {
        Self::new(false)
    }

    fn new(accept: bool) -> Self {
        Self {
            accept,
            notices: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl UserInteraction for ScriptedInteraction {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }

    fn confirm(&self, question: &str) -> bool {
        self.prompts.lock().unwrap().push(question.to_string());
        self.accept
    }
}
