use std::time::{Duration as StdDuration, Instant};

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::DashboardConfig;
use crate::error::{ApiErrorCode, AppError, AppResult};
use crate::models::consent::ConsentState;
use crate::models::privacy::{ConsentAck, RequestStatus};
use crate::models::score::{PricingExplanation, ScoreSummary};
use crate::models::trip::{Trip, TripListResponse};

/// Thin JSON client for the scoring backend. Every failure comes back as a
/// classified [`AppError::Api`]; substitution happens one layer up.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: StdDuration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Some(StdDuration::from_secs(90)))
            .build()
            .map_err(|err| AppError::other(format!("failed to build backend HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &DashboardConfig) -> AppResult<Self> {
        Self::new(&config.api_base_url, config.http_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_driving_scores(&self, user_id: &str) -> AppResult<ScoreSummary> {
        let path = format!("/users/{user_id}/driving-scores");
        self.send_json::<(), _>(Method::GET, &path, None).await
    }

    pub async fn get_trips(&self, user_id: &str) -> AppResult<Vec<Trip>> {
        let path = format!("/users/{user_id}/trips");
        let envelope: TripListResponse = self.send_json::<(), _>(Method::GET, &path, None).await?;
        Ok(envelope.trips)
    }

    pub async fn get_trip_details(&self, user_id: &str, trip_id: &str) -> AppResult<Option<Trip>> {
        let path = format!("/users/{user_id}/trips/{trip_id}");
        self.send_json::<(), _>(Method::GET, &path, None).await
    }

    pub async fn get_pricing_explanation(&self, policy_id: &str) -> AppResult<PricingExplanation> {
        let path = format!("/pricing/explanation/{policy_id}");
        self.send_json::<(), _>(Method::GET, &path, None).await
    }

    pub async fn post_consent(&self, user_id: &str, consent: &ConsentState) -> AppResult<ConsentAck> {
        let path = format!("/users/{user_id}/consent");
        self.send_json(Method::POST, &path, Some(consent)).await
    }

    pub async fn post_data_export(&self, user_id: &str) -> AppResult<RequestStatus> {
        let path = format!("/users/{user_id}/export");
        self.send_json::<(), _>(Method::POST, &path, None).await
    }

    pub async fn post_data_deletion(&self, user_id: &str) -> AppResult<RequestStatus> {
        let path = format!("/users/{user_id}/delete");
        self.send_json::<(), _>(Method::POST, &path, None).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let correlation_id = Uuid::new_v4().to_string();
        let url = format!("{}{}", self.base_url, path);

        debug!(
            target: "app::api::http",
            method = %method,
            %path,
            correlation_id = %correlation_id,
            "calling backend"
        );

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let start = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|err| Self::error_from_reqwest(err, &correlation_id))?;

        let status = response.status();
        let latency_ms = start.elapsed().as_millis();
        if !status.is_success() {
            warn!(
                target: "app::api::http",
                %path,
                correlation_id = %correlation_id,
                status = status.as_u16(),
                latency_ms,
                "backend returned non-success status"
            );
            return Err(Self::map_http_error(status, &correlation_id));
        }

        debug!(
            target: "app::api::http",
            %path,
            correlation_id = %correlation_id,
            latency_ms,
            "backend responded"
        );

        response.json::<T>().await.map_err(|err| {
            AppError::api_with_details(
                ApiErrorCode::InvalidResponse,
                format!("failed to decode backend response for {path}"),
                Some(correlation_id.as_str()),
                Some(json!({ "reason": err.to_string() })),
            )
        })
    }

    pub(crate) fn map_http_error(status: StatusCode, correlation_id: &str) -> AppError {
        let (code, message) = match status {
            StatusCode::NOT_FOUND => (ApiErrorCode::NotFound, "backend resource not found".to_string()),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => (
                ApiErrorCode::InvalidRequest,
                "backend rejected the request".to_string(),
            ),
            status if status.is_server_error() => (
                ApiErrorCode::BackendUnavailable,
                format!("backend temporarily unavailable (status {})", status.as_u16()),
            ),
            status => (
                ApiErrorCode::Unknown,
                format!("backend returned status {}", status.as_u16()),
            ),
        };

        AppError::api_with_details(
            code,
            message,
            Some(correlation_id),
            Some(json!({ "status": status.as_u16() })),
        )
    }

    fn error_from_reqwest(err: reqwest::Error, correlation_id: &str) -> AppError {
        if err.is_timeout() {
            AppError::api_with_details(
                ApiErrorCode::HttpTimeout,
                "backend request timed out",
                Some(correlation_id),
                None,
            )
        } else if err.is_connect() {
            AppError::api_with_details(
                ApiErrorCode::BackendUnavailable,
                "could not connect to backend",
                Some(correlation_id),
                None,
            )
        } else if let Some(status) = err.status() {
            Self::map_http_error(status, correlation_id)
        } else {
            AppError::api_with_details(
                ApiErrorCode::Unknown,
                format!("backend request failed: {err}"),
                Some(correlation_id),
                None,
            )
        }
    }
}
