/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Placeholder rendered in place of an absent numeric metric.
pub const MISSING_VALUE: &str = "N/A";

/// One decimal place, or the placeholder when the value is absent.
pub fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.1}"),
        None => MISSING_VALUE.to_string(),
    }
}
