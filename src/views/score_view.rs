use std::fmt::Write;

use crate::models::score::FeatureContribution;
use crate::utils::markup::escape_html;

/// Qualitative band for the overall driving score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
    Poor,
}

impl ScoreTier {
    /// Lower bounds are inclusive: 80.0 is excellent, 79.9 is good.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreTier::Excellent
        } else if score >= 70.0 {
            ScoreTier::Good
        } else if score >= 60.0 {
            ScoreTier::Fair
        } else if score >= 50.0 {
            ScoreTier::NeedsImprovement
        } else {
            ScoreTier::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Good => "good",
            ScoreTier::Fair => "fair",
            ScoreTier::NeedsImprovement => "needs-improvement",
            ScoreTier::Poor => "poor",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent driving! You're a very safe driver.",
            ScoreTier::Good => "Good job! Your driving habits are quite safe.",
            ScoreTier::Fair => "Not bad, but there's room for improvement.",
            ScoreTier::NeedsImprovement => "Your driving could be safer. Let's work on that.",
            ScoreTier::Poor => "Safety first! Consider improving your driving habits.",
        }
    }
}

/// Display label for a raw feature key. Unknown keys pass through.
pub fn human_readable_feature(feature: &str) -> &str {
    match feature {
        "f_trip_max_speed" => "Max Speed",
        "f_trip_avg_accel" => "Average Acceleration",
        "f_trip_harsh_brake_count" => "Harsh Braking Events",
        "f_trip_night_driving_minutes" => "Night Driving Time",
        "f_policy_monthly_miles_30d" => "Monthly Miles Driven",
        "f_policy_percent_city_driving" => "City Driving Percentage",
        "f_policy_percent_highway" => "Highway Driving Percentage",
        other => other,
    }
}

/// Two decimals, explicit `+` for positive values.
pub fn format_contribution(contribution: f64) -> String {
    // adding 0.0 folds -0.0 into 0.0
    let value = contribution + 0.0;
    if value > 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn render_feature_list(out: &mut String, features: &[FeatureContribution]) {
    out.push_str("<ul class=\"feature-list\">");
    for feature in features {
        let _ = write!(
            out,
            "<li>{}: {}</li>",
            escape_html(human_readable_feature(&feature.feature)),
            format_contribution(feature.contribution)
        );
    }
    out.push_str("</ul>");
}

pub fn render_score_panel(
    score: f64,
    model_version: &str,
    top_features: &[FeatureContribution],
) -> String {
    let tier = ScoreTier::from_score(score);
    let mut out = String::new();

    out.push_str("<div class=\"score-panel\"><h2>Your Driving Score</h2>");
    let _ = write!(
        out,
        "<div class=\"score-display\"><span class=\"score-value\">{score:.1}</span>\
         <span class=\"score-label\">out of 100</span></div>"
    );
    let _ = write!(
        out,
        "<p class=\"score-description score-{}\">{}</p>",
        tier.as_str(),
        escape_html(tier.description())
    );
    let _ = write!(
        out,
        "<div class=\"model-info\">Model: {}</div>",
        escape_html(model_version)
    );
    out.push_str("<div class=\"explanation\"><h3>What affects your score:</h3>");
    render_feature_list(&mut out, top_features);
    out.push_str(
        "<p class=\"explanation-note\">Higher scores mean safer driving and potentially lower insurance costs.</p>",
    );
    out.push_str("</div></div>");

    out
}
