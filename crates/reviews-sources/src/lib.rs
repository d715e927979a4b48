pub mod error;
pub mod itunes;
pub mod traits;

pub use error::FeedError;
pub use itunes::{extract_app_id, parse_reviews, ItunesClient};
pub use traits::ReviewFeed;
