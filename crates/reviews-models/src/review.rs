use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A review as extracted from one feed entry, before normalization.
///
/// Equality and hashing cover every field, so two entries scraped from
/// overlapping pages compare equal only when they are identical row for row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FeedReview {
    pub username: String,
    pub published_at: String, // Raw feed timestamp (updated, else published)
    pub rating: u8,
    pub title: String,
    pub content: String,
}

/// A normalized review row, ready for export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub username: String,
    pub published_at: Option<NaiveDateTime>, // UTC, None when the feed value did not parse
    pub rating: u8,
    pub title: String,
    pub content: String,
}

impl Review {
    /// Column order used by every exporter
    pub const COLUMNS: [&'static str; 5] = ["username", "published_at", "rating", "title", "content"];

    pub fn from_feed(review: FeedReview, published_at: Option<NaiveDateTime>) -> Self {
        Self {
            username: review.username,
            published_at,
            rating: review.rating,
            title: review.title,
            content: review.content,
        }
    }
}
