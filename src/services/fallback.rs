//! Placeholder data served when the backend cannot be reached.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::privacy::{ConsentAck, RequestState, RequestStatus};
use crate::models::score::{FeatureContribution, PricingExplanation, ScoreSummary};
use crate::models::trip::Trip;

pub const FALLBACK_SCORE: f64 = 65.4;
pub const FALLBACK_MODEL_VERSION: &str = "v20251109_1";
pub const FALLBACK_EXPLANATION: &str =
    "Your driving score is based on speed, acceleration patterns, and braking behavior.";
pub const FALLBACK_EXPORT_REQUEST_ID: &str = "req-123";
pub const FALLBACK_DELETION_REQUEST_ID: &str = "del-456";

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn top_features() -> Vec<FeatureContribution> {
    vec![
        FeatureContribution::new("f_trip_max_speed", 0.45),
        FeatureContribution::new("f_trip_avg_accel", 0.32),
        FeatureContribution::new("f_trip_harsh_brake_count", 0.18),
    ]
}

pub fn driving_scores() -> ScoreSummary {
    ScoreSummary {
        current_score: FALLBACK_SCORE,
        model_version: FALLBACK_MODEL_VERSION.to_string(),
        top_features: top_features(),
    }
}

pub fn trips() -> Vec<Trip> {
    vec![
        Trip {
            id: "trip-001".to_string(),
            start_time: utc(2025, 11, 9, 8, 30),
            end_time: utc(2025, 11, 9, 9, 15),
            distance_miles: Some(15.7),
            max_speed: Some(52.9),
            harsh_brake_count: 2,
            score: Some(68.5),
        },
        Trip {
            id: "trip-002".to_string(),
            start_time: utc(2025, 11, 9, 17, 45),
            end_time: utc(2025, 11, 9, 18, 30),
            distance_miles: Some(11.6),
            max_speed: Some(44.8),
            harsh_brake_count: 0,
            score: Some(62.3),
        },
    ]
}

pub fn trip_details(trip_id: &str) -> Option<Trip> {
    trips().into_iter().find(|trip| trip.id == trip_id)
}

pub fn pricing_explanation() -> PricingExplanation {
    PricingExplanation {
        risk_score: FALLBACK_SCORE,
        top_features: top_features(),
        model_version: FALLBACK_MODEL_VERSION.to_string(),
        explanation: FALLBACK_EXPLANATION.to_string(),
    }
}

/// Simulated acknowledgement. Indistinguishable from a real success.
pub fn consent_ack() -> ConsentAck {
    ConsentAck {
        status: RequestState::Success,
        message: "Consent updated".to_string(),
    }
}

pub fn export_request() -> RequestStatus {
    RequestStatus {
        status: RequestState::Pending,
        request_id: Some(FALLBACK_EXPORT_REQUEST_ID.to_string()),
        message: "Export request submitted".to_string(),
    }
}

pub fn deletion_request() -> RequestStatus {
    RequestStatus {
        status: RequestState::Pending,
        request_id: Some(FALLBACK_DELETION_REQUEST_ID.to_string()),
        message: "Deletion request submitted".to_string(),
    }
}
