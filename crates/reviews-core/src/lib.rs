pub mod dedup;
pub mod error;
pub mod export;
pub mod normalize;
pub mod writer;

pub use dedup::remove_duplicate_reviews;
pub use error::ExportError;
pub use export::{ExportOptions, ExportOrchestrator, ExportSummary, StopReason};
pub use normalize::{normalize_reviews, parse_timestamp};
pub use writer::{write_reviews, ExportFormat};
