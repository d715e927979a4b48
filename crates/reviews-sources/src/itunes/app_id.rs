use crate::error::FeedError;
use regex::Regex;
use std::sync::OnceLock;

static APP_ID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn app_id_pattern() -> &'static Regex {
    APP_ID_PATTERN.get_or_init(|| Regex::new(r"id([0-9]+)").expect("app id pattern is valid"))
}

/// Resolve a numeric App Store ID from either a bare ID or a storefront URL
/// such as `https://apps.apple.com/us/app/name/id416048305`.
pub fn extract_app_id(input: &str) -> Result<String, FeedError> {
    let s = input.trim();
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(s.to_string());
    }

    app_id_pattern()
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| FeedError::InvalidAppId(input.to_string()))
}
