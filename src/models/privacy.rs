use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle value reported by the backend for privacy requests and
/// consent acknowledgements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    Pending,
    Success,
    Queued,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Pending => "pending",
            RequestState::Success => "success",
            RequestState::Queued => "queued",
            RequestState::Processing => "processing",
            RequestState::Completed => "completed",
            RequestState::Failed => "failed",
            RequestState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an export or deletion request. Held in memory only and
/// replaced by the next request of the same kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestStatus {
    pub status: RequestState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsentAck {
    pub status: RequestState,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub message: String,
}
