use crate::error::FeedError;
use async_trait::async_trait;

/// A paginated source of review feed documents
#[async_trait]
pub trait ReviewFeed: Send + Sync {
    fn source_name(&self) -> &str;

    /// Fetch one raw feed page. Pages are 1-based.
    async fn fetch_page(&self, app_id: &str, country: &str, page: u32) -> Result<String, FeedError>;
}
