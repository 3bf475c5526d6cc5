#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use common::ScriptedInteraction;
use drivescore_dashboard_lib::commands::dashboard::{
    dashboard_render, pricing_render, trip_detail_render,
};
use drivescore_dashboard_lib::commands::privacy::{
    consent_update, data_deletion_request, data_export_request, ConsentUpdatePayload,
};
use drivescore_dashboard_lib::commands::AppState;
use drivescore_dashboard_lib::config::{DashboardConfig, FallbackPolicy};
use drivescore_dashboard_lib::models::consent::{ConsentState, LocationPrecision};
use httpmock::prelude::*;
use serde_json::json;

fn config_for(base_url: &str) -> DashboardConfig {
    let mut config = DashboardConfig {
        api_base_url: base_url.to_string(),
        http_timeout_secs: 2,
        ..DashboardConfig::default()
    };
    config.normalize().expect("valid config");
    config
}

fn state_for(config: DashboardConfig, interaction: &Arc<ScriptedInteraction>) -> AppState {
    AppState::new(config, interaction.clone()).expect("state builds")
}

#[tokio::test]
async fn dashboard_renders_backend_scores_and_trips() {
    let server = MockServer::start_async().await;
    let scores = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/user123/driving-scores");
            then.status(200).json_body(json!({
                "current_score": 72.5,
                "model_version": "v20260301_4",
                "top_features": [
                    {"feature": "f_trip_harsh_brake_count", "contribution": -0.2}
                ]
            }));
        })
        .await;
    let trips = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/user123/trips");
            then.status(200).json_body(json!({
                "trips": [{
                    "id": "t-77",
                    "start_time": "2026-03-10T06:15:00Z",
                    "end_time": "2026-03-10T06:45:00Z",
                    "distance_mi": 14.0,
                    "max_speed": 61.0,
                    "harsh_brakes": 1,
                    "score": 88.0
                }]
            }));
        })
        .await;

    let interaction = Arc::new(ScriptedInteraction::accepting());
    let state = state_for(config_for(&server.base_url()), &interaction);
    let now = Utc.with_ymd_and_hms(2026, 3, 12, 12, 0, 0).unwrap();

    let html = dashboard_render(&state, now).await.expect("renders");

    scores.assert_async().await;
    trips.assert_async().await;
    assert!(html.contains("<h1>Your Driving Dashboard</h1>"));
    assert!(html.contains("<span class=\"score-value\">72.5</span>"));
    assert!(html.contains("Model: v20260301_4"));
    assert!(html.contains("-0.20"));
    assert!(html.contains("2 days ago"));
    assert!(html.contains("Great driving!"));
    assert!(html.contains("Your Privacy Controls"));
}

#[tokio::test]
async fn unreachable_backend_still_renders_placeholder_dashboard() {
    let interaction = Arc::new(ScriptedInteraction::accepting());
    let state = state_for(config_for("http://127.0.0.1:1"), &interaction);
    let now = Utc.with_ymd_and_hms(2025, 11, 9, 20, 0, 0).unwrap();

    let html = dashboard_render(&state, now).await.expect("renders");

    assert!(html.contains("<span class=\"score-value\">65.4</span>"));
    assert!(html.contains("Model: v20251109_1"));
    assert!(!html.contains("Oops! Something went wrong"));
    assert!(interaction.notices().is_empty());
}

#[tokio::test]
async fn propagate_policy_turns_outage_into_error_view() {
    let interaction = Arc::new(ScriptedInteraction::accepting());
    let mut config = config_for("http://127.0.0.1:1");
    config.fallback_policy = FallbackPolicy::Propagate;
    let state = state_for(config, &interaction);

    let html = dashboard_render(&state, Utc::now()).await.expect("renders");

    assert!(html.contains("Oops! Something went wrong"));
    assert!(html.contains("Try Again"));
}

#[tokio::test]
async fn consent_command_pushes_each_change() {
    let server = MockServer::start_async().await;
    let telematics_off = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/users/user123/consent")
                .json_body(json!({
                    "telematics": false,
                    "location": "exact",
                    "data_retention": true
                }));
            then.status(200)
                .json_body(json!({"status": "success", "message": "Saved"}));
        })
        .await;
    let retention_off = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/users/user123/consent")
                .json_body(json!({
                    "telematics": false,
                    "location": "exact",
                    "data_retention": false
                }));
            then.status(200)
                .json_body(json!({"status": "success", "message": "Saved"}));
        })
        .await;

    let interaction = Arc::new(ScriptedInteraction::accepting());
    let state = state_for(config_for(&server.base_url()), &interaction);

    let html = consent_update(
        &state,
        ConsentUpdatePayload {
            telematics: Some(false),
            location: None,
            data_retention: Some(false),
        },
    )
    .await
    .expect("consent update");

    telematics_off.assert_async().await;
    retention_off.assert_async().await;
    assert_eq!(interaction.notices().len(), 2);
    assert!(html.contains("<select name=\"location\" disabled>"));
    assert!(!html.contains("(not saved)"));
}

#[tokio::test]
async fn location_change_with_telematics_off_is_rejected_before_sending() {
    let server = MockServer::start_async().await;
    let consent = server
        .mock_async(|when, then| {
            when.method(POST).path("/users/user123/consent");
            then.status(200)
                .json_body(json!({"status": "success", "message": "Saved"}));
        })
        .await;

    let interaction = Arc::new(ScriptedInteraction::accepting());
    let state = state_for(config_for(&server.base_url()), &interaction);

    let error = consent_update(
        &state,
        ConsentUpdatePayload {
            telematics: Some(false),
            location: Some("coarse".to_string()),
            data_retention: None,
        },
    )
    .await
    .expect_err("location is locked");

    assert_eq!(error.code, "VALIDATION_ERROR");
    consent.assert_hits_async(0).await;
    assert!(interaction.notices().is_empty());
}

#[tokio::test]
async fn seeded_consent_keeps_fields_that_were_not_given() {
    let server = MockServer::start_async().await;
    let consent = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/users/user123/consent")
                .json_body(json!({
                    "telematics": false,
                    "location": "aggregated",
                    "data_retention": true
                }));
            then.status(200)
                .json_body(json!({"status": "success", "message": "Saved"}));
        })
        .await;

    let mut config = config_for(&server.base_url());
    config.initial_consent = Some(ConsentState {
        telematics_sharing_enabled: false,
        location_precision: LocationPrecision::Aggregated,
        data_retention_enabled: false,
    });
    let interaction = Arc::new(ScriptedInteraction::accepting());
    let state = state_for(config, &interaction);

    let error = consent_update(
        &state,
        ConsentUpdatePayload {
            telematics: None,
            location: Some("exact".to_string()),
            data_retention: Some(true),
        },
    )
    .await
    .expect_err("sharing stays off");
    assert_eq!(error.code, "VALIDATION_ERROR");
    consent.assert_hits_async(0).await;

    let html = consent_update(
        &state,
        ConsentUpdatePayload {
            telematics: None,
            location: None,
            data_retention: Some(true),
        },
    )
    .await
    .expect("retention update");

    consent.assert_hits_async(1).await;
    assert!(html.contains("<option value=\"aggregated\" selected>"));
}

#[tokio::test]
async fn re_enabling_telematics_unlocks_location_in_one_command() {
    let server = MockServer::start_async().await;
    let consent = server
        .mock_async(|when, then| {
            when.method(POST).path("/users/user123/consent");
            then.status(200)
                .json_body(json!({"status": "success", "message": "Saved"}));
        })
        .await;

    let mut config = config_for(&server.base_url());
    config.initial_consent = Some(ConsentState {
        telematics_sharing_enabled: false,
        ..ConsentState::default()
    });
    let interaction = Arc::new(ScriptedInteraction::accepting());
    let state = state_for(config, &interaction);

    consent_update(
        &state,
        ConsentUpdatePayload {
            telematics: Some(true),
            location: Some("coarse".to_string()),
            data_retention: None,
        },
    )
    .await
    .expect("both changes apply");

    consent.assert_hits_async(2).await;
}

#[tokio::test]
async fn unknown_location_value_is_a_validation_error() {
    let interaction = Arc::new(ScriptedInteraction::accepting());
    let state = state_for(config_for("http://127.0.0.1:1"), &interaction);

    let error = consent_update(
        &state,
        ConsentUpdatePayload {
            telematics: None,
            location: Some("street".to_string()),
            data_retention: None,
        },
    )
    .await
    .expect_err("unknown precision");

    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn privacy_requests_render_backend_status() {
    let server = MockServer::start_async().await;
    let export = server
        .mock_async(|when, then| {
            when.method(POST).path("/users/user123/export");
            then.status(200).json_body(json!({
                "status": "queued",
                "request_id": "exp-9",
                "message": "Data export request queued."
            }));
        })
        .await;
    let deletion = server
        .mock_async(|when, then| {
            when.method(POST).path("/users/user123/delete");
            then.status(200).json_body(json!({
                "status": "queued",
                "request_id": "del-9",
                "message": "Data deletion request queued."
            }));
        })
        .await;

    let interaction = Arc::new(ScriptedInteraction::accepting());
    let state = state_for(config_for(&server.base_url()), &interaction);

    let html = data_export_request(&state).await.expect("export");
    export.assert_async().await;
    assert!(html.contains("Data export request queued.<span> (Request #exp-9)</span>"));

    let html = data_deletion_request(&state).await.expect("deletion");
    deletion.assert_async().await;
    assert!(html.contains("Data deletion request queued.<span> (Request #del-9)</span>"));
    assert_eq!(interaction.prompts().len(), 1);
}

#[tokio::test]
async fn declined_deletion_never_reaches_backend() {
    let server = MockServer::start_async().await;
    let deletion = server
        .mock_async(|when, then| {
            when.method(POST).path("/users/user123/delete");
            then.status(200).json_body(json!({
                "status": "queued",
                "request_id": "del-9",
                "message": "Data deletion request queued."
            }));
        })
        .await;

    let interaction = Arc::new(ScriptedInteraction::declining());
    let state = state_for(config_for(&server.base_url()), &interaction);

    let html = data_deletion_request(&state).await.expect("renders");

    deletion.assert_hits_async(0).await;
    assert!(!html.contains("Deletion Request:"));
}

#[tokio::test]
async fn trip_and_pricing_commands_use_fallbacks_offline() {
    let interaction = Arc::new(ScriptedInteraction::accepting());
    let state = state_for(config_for("http://127.0.0.1:1"), &interaction);
    let now = Utc.with_ymd_and_hms(2025, 11, 12, 9, 0, 0).unwrap();

    let html = trip_detail_render(&state, "trip-002", now)
        .await
        .expect("trip detail");
    assert!(html.contains("11.6 miles"));

    let html = trip_detail_render(&state, "missing", now)
        .await
        .expect("trip detail");
    assert!(html.contains("find that trip."));

    let html = pricing_render(&state, "policy-1").await.expect("pricing");
    assert!(html.contains("speed, acceleration patterns, and braking behavior"));
}
