use std::fmt::Write;

use crate::models::score::PricingExplanation;
use crate::utils::markup::escape_html;
use crate::views::score_view::render_feature_list;

pub fn render_pricing_explanation(explanation: &PricingExplanation) -> String {
    let mut out = String::new();

    out.push_str("<div class=\"pricing-explanation\"><h2>How Your Rate Is Calculated</h2>");
    let _ = write!(
        out,
        "<div class=\"score-display\"><span class=\"score-value\">{:.1}</span>\
         <span class=\"score-label\">risk score</span></div>",
        explanation.risk_score
    );
    if !explanation.explanation.is_empty() {
        let _ = write!(
            out,
            "<p class=\"pricing-summary\">{}</p>",
            escape_html(&explanation.explanation)
        );
    }
    out.push_str("<h3>Top factors:</h3>");
    render_feature_list(&mut out, &explanation.top_features);
    let _ = write!(
        out,
        "<div class=\"model-info\">Model: {}</div></div>",
        escape_html(&explanation.model_version)
    );

    out
}
