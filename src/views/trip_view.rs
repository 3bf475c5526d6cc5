use std::fmt::Write;

use chrono::{DateTime, Local, Utc};

use crate::models::trip::Trip;
use crate::utils::markup::{escape_html, format_optional, MISSING_VALUE};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub const EMPTY_TRIPS_MESSAGE: &str =
    "You haven't taken any trips yet. Start driving to see your data here!";
pub const TRIP_NOT_FOUND_MESSAGE: &str = "We couldn't find that trip.";

/// Per-trip quality label. Thresholds are separate from the overall
/// [`ScoreTier`](crate::views::score_view::ScoreTier) bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripRating {
    Great,
    Good,
    Okay,
    NeedsImprovement,
}

impl TripRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            TripRating::Great
        } else if score >= 70.0 {
            TripRating::Good
        } else if score >= 60.0 {
            TripRating::Okay
        } else {
            TripRating::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TripRating::Great => "Great driving!",
            TripRating::Good => "Good trip",
            TripRating::Okay => "Okay",
            TripRating::NeedsImprovement => "Needs improvement",
        }
    }
}

/// Whole days between `start` and `now`, rounded down. Trips stamped in the
/// future count as today.
pub fn elapsed_days(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - start).num_milliseconds();
    millis.div_euclid(MILLIS_PER_DAY).max(0)
}

pub fn format_absolute_date(start: DateTime<Utc>) -> String {
    start.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
}

pub fn relative_trip_date(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match elapsed_days(start, now) {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        days @ 2..=6 => format!("{days} days ago"),
        _ => format_absolute_date(start),
    }
}

fn score_line(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:.1} - {}", TripRating::from_score(value).label()),
        None => MISSING_VALUE.to_string(),
    }
}

fn render_metric(out: &mut String, label: &str, value: &str) {
    let _ = write!(
        out,
        "<div class=\"trip-metric\"><span class=\"metric-label\">{label}</span>\
         <span class=\"metric-value\">{value}</span></div>"
    );
}

fn render_trip_card(out: &mut String, trip: &Trip, now: DateTime<Utc>, with_times: bool) {
    let _ = write!(
        out,
        "<div class=\"trip-card\" data-trip-id=\"{}\"><div class=\"trip-header\">\
         <span class=\"trip-date\">{}</span><span class=\"trip-score\">{}</span></div>",
        escape_html(&trip.id),
        escape_html(&relative_trip_date(trip.start_time, now)),
        score_line(trip.score)
    );

    out.push_str("<div class=\"trip-details\">");
    if with_times {
        render_metric(
            out,
            "Started:",
            &trip.start_time.with_timezone(&Local).format("%-m/%-d/%Y %H:%M").to_string(),
        );
        render_metric(
            out,
            "Ended:",
            &trip.end_time.with_timezone(&Local).format("%-m/%-d/%Y %H:%M").to_string(),
        );
    }
    render_metric(
        out,
        "Miles driven:",
        &format!("{} miles", format_optional(trip.distance_miles)),
    );
    render_metric(
        out,
        "Top speed:",
        &format!("{} mph", format_optional(trip.max_speed)),
    );
    render_metric(out, "Sudden stops:", &trip.harsh_brake_count.to_string());
    out.push_str("</div></div>");
}

pub fn render_trip_history(trips: &[Trip], now: DateTime<Utc>) -> String {
    let mut out = String::from("<div class=\"trip-list\"><h2>Your Recent Drives</h2>");

    if trips.is_empty() {
        let _ = write!(out, "<p class=\"empty-state\">{}</p>", escape_html(EMPTY_TRIPS_MESSAGE));
    } else {
        out.push_str("<div class=\"trips-container\">");
        for trip in trips {
            render_trip_card(&mut out, trip, now, false);
        }
        out.push_str("</div>");
    }

    out.push_str("</div>");
    out
}

pub fn render_trip_detail(trip: Option<&Trip>, now: DateTime<Utc>) -> String {
    let mut out = String::from("<div class=\"trip-detail\"><h2>Trip Details</h2>");
    match trip {
        Some(trip) => render_trip_card(&mut out, trip, now, true),
        None => {
            let _ = write!(out, "<p class=\"empty-state\">{}</p>", escape_html(TRIP_NOT_FOUND_MESSAGE));
        }
    }
    out.push_str("</div>");
    out
}
