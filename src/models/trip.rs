use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "distance_mi", default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,
    #[serde(
        rename = "harsh_brakes",
        default,
        deserialize_with = "crate::models::null_as_default"
    )]
    pub harsh_brake_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Envelope of `GET /users/{id}/trips`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripListResponse {
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub trips: Vec<Trip>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_metrics_stay_absent_but_brakes_default_to_zero() {
        let trip: Trip = serde_json::from_value(json!({
            "id": "trip-9",
            "start_time": "2025-11-09T08:30:00Z",
            "end_time": "2025-11-09T09:15:00Z"
        }))
        .expect("trip decodes");

        assert_eq!(trip.distance_miles, None);
        assert_eq!(trip.max_speed, None);
        assert_eq!(trip.score, None);
        assert_eq!(trip.harsh_brake_count, 0);
    }

    #[test]
    fn null_brake_count_reads_as_zero() {
        let trip: Trip = serde_json::from_value(json!({
            "id": "trip-10",
            "start_time": "2025-11-09T08:30:00Z",
            "end_time": "2025-11-09T09:15:00Z",
            "distance_mi": null,
            "harsh_brakes": null
        }))
        .expect("trip decodes");

        assert_eq!(trip.harsh_brake_count, 0);
        assert_eq!(trip.distance_miles, None);
    }

    #[test]
    fn null_trip_list_is_empty() {
        let response: TripListResponse =
            serde_json::from_value(json!({ "trips": null })).expect("envelope decodes");
        assert!(response.trips.is_empty());
    }

    #[test]
    fn trip_list_without_trips_key_is_empty() {
        let response: TripListResponse =
            serde_json::from_value(json!({})).expect("envelope decodes");
        assert!(response.trips.is_empty());
    }
}
