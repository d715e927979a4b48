// Merge-time deduplication for reviews collected across feed pages

use reviews_models::FeedReview;
use std::collections::HashSet;
use tracing::debug;

/// Drop exact duplicate rows, keeping the first occurrence in collection order.
///
/// Rows are compared on every field. Overlapping pages produce identical rows
/// and collapse; the same text with a different timestamp is kept.
pub fn remove_duplicate_reviews(reviews: Vec<FeedReview>) -> Vec<FeedReview> {
    let before = reviews.len();
    let mut seen = HashSet::with_capacity(before);
    let mut unique = reviews;
    unique.retain(|review| seen.insert(review.clone()));

    debug!(before, after = unique.len(), "Removed duplicate reviews");
    unique
}
