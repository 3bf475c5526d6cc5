use std::collections::BTreeSet;
use std::fmt::Write;

use crate::models::consent::{ConsentField, ConsentState, LocationPrecision};
use crate::models::privacy::RequestStatus;
use crate::utils::markup::escape_html;

pub struct PrivacyPanelView<'a> {
    pub consent: &'a ConsentState,
    pub unsynced: &'a BTreeSet<ConsentField>,
    pub export_status: Option<&'a RequestStatus>,
    pub delete_status: Option<&'a RequestStatus>,
}

const DATA_USES: [&str; 4] = [
    "Give you insurance rates that match your driving style",
    "Show you tips to drive more safely",
    "Make claims easier when you need them",
    "Help improve safety for everyone (your personal data stays private)",
];

fn unsynced_badge(view: &PrivacyPanelView<'_>, field: ConsentField) -> &'static str {
    if view.unsynced.contains(&field) {
        " <span class=\"unsynced\">(not saved)</span>"
    } else {
        ""
    }
}

fn render_checkbox(out: &mut String, name: ConsentField, checked: bool, label: &str, badge: &str) {
    let _ = write!(
        out,
        "<label class=\"consent-option\"><input type=\"checkbox\" name=\"{}\"{}/> {}{}</label>",
        name.as_str(),
        if checked { " checked" } else { "" },
        escape_html(label),
        badge
    );
}

fn render_status(out: &mut String, css: &str, title: &str, status: &RequestStatus) {
    let _ = write!(
        out,
        "<div class=\"status-message {css}\"><strong>{title}:</strong> {}",
        escape_html(&status.message)
    );
    if let Some(request_id) = &status.request_id {
        let _ = write!(out, "<span> (Request #{})</span>", escape_html(request_id));
    }
    out.push_str("</div>");
}

pub fn render_privacy_panel(view: &PrivacyPanelView<'_>) -> String {
    let consent = view.consent;
    let mut out = String::from("<div class=\"privacy-settings\"><h2>Your Privacy Controls</h2>");

    out.push_str("<div class=\"settings-section\"><h3>What We Collect</h3><div class=\"consent-options\">");
    render_checkbox(
        &mut out,
        ConsentField::TelematicsSharing,
        consent.telematics_sharing_enabled,
        "Share my driving data to get personalized insurance rates",
        unsynced_badge(view, ConsentField::TelematicsSharing),
    );

    let _ = write!(
        out,
        "<div class=\"location-precision\"><label>How precise should location tracking be?{}</label>\
         <select name=\"location\"{}>",
        unsynced_badge(view, ConsentField::LocationPrecision),
        if consent.location_editable() { "" } else { " disabled" }
    );
    for precision in LocationPrecision::ALL {
        let _ = write!(
            out,
            "<option value=\"{}\"{}>{}</option>",
            precision.as_str(),
            if precision == consent.location_precision { " selected" } else { "" },
            escape_html(precision.description())
        );
    }
    out.push_str("</select></div>");

    render_checkbox(
        &mut out,
        ConsentField::DataRetention,
        consent.data_retention_enabled,
        "Keep my data for up to 3 years (helps with claims and better rates)",
        unsynced_badge(view, ConsentField::DataRetention),
    );
    out.push_str("</div></div>");

    out.push_str(
        "<div class=\"settings-section\"><h3>Your Data Rights</h3><div class=\"data-actions\">\
         <button class=\"action-button export\">Download My Data</button>\
         <button class=\"action-button delete\">Delete Everything</button></div>",
    );
    if let Some(status) = view.export_status {
        render_status(&mut out, "success", "Download Request", status);
    }
    if let Some(status) = view.delete_status {
        render_status(&mut out, "warning", "Deletion Request", status);
    }
    out.push_str("</div>");

    out.push_str(
        "<div class=\"settings-section\"><h3>How We Use Your Data</h3><div class=\"info-text\">\
         <p>We use your driving information to:</p><ul>",
    );
    for data_use in DATA_USES {
        let _ = write!(out, "<li>{}</li>", escape_html(data_use));
    }
    out.push_str(
        "</ul><p>Your information is always protected with strong security. \
         You can change your mind anytime.</p></div></div></div>",
    );

    out
}
