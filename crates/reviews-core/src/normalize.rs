use chrono::{DateTime, NaiveDate, NaiveDateTime};
use reviews_models::{FeedReview, Review};
use tracing::debug;

// Offset-less forms are taken as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Coerce a feed timestamp to a UTC-naive date-time.
///
/// Returns `None` for anything that does not parse; callers export that as a
/// missing value rather than failing.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    // e.g. 2024-05-19T10:00:00-0700
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.naive_utc());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Convert parsed feed rows into export rows
pub fn normalize_reviews(reviews: Vec<FeedReview>) -> Vec<Review> {
    reviews
        .into_iter()
        .map(|review| {
            let published_at = parse_timestamp(&review.published_at);
            if published_at.is_none() {
                debug!(raw = %review.published_at, "Unparseable review timestamp");
            }
            Review::from_feed(review, published_at)
        })
        .collect()
}
