pub mod review;

pub use review::{FeedReview, Review};
