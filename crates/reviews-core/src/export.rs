use crate::dedup::remove_duplicate_reviews;
use crate::error::ExportError;
use crate::normalize::normalize_reviews;
use crate::writer::{write_reviews, ExportFormat};
use reviews_config::Config;
use reviews_models::FeedReview;
use reviews_sources::{extract_app_id, parse_reviews, ReviewFeed};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Parameters for one export run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub app: String,
    pub country: String,
    pub max_pages: u32,
    pub output_file: PathBuf,
    pub request_delay: Duration,
}

impl From<&Config> for ExportOptions {
    fn from(config: &Config) -> Self {
        Self {
            app: config.app.clone(),
            country: config.country.trim().to_lowercase(),
            max_pages: config.max_pages,
            output_file: config.output_file.clone(),
            request_delay: config.request_delay(),
        }
    }
}

/// Why pagination stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A page came back with no reviews
    Exhausted,
    /// Every page up to `max_pages` was fetched
    CeilingReached,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::Exhausted => "exhausted",
            StopReason::CeilingReached => "ceiling_reached",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub app_id: String,
    pub country: String,
    pub pages_fetched: u32,
    pub stop_reason: StopReason,
    /// Reviews parsed across all pages, before deduplication
    pub fetched: usize,
    pub duplicates_removed: usize,
    /// Rows written to the output file
    pub exported: usize,
    pub unparsed_timestamps: usize,
    pub output_file: PathBuf,
    pub format: ExportFormat,
}

/// Reviews accumulated by the pagination loop
#[derive(Debug)]
pub struct CollectedPages {
    pub reviews: Vec<FeedReview>,
    pub pages_fetched: u32,
    pub stop_reason: StopReason,
}

/// Drives one export: paginate, merge, normalize, write
pub struct ExportOrchestrator<F: ReviewFeed> {
    feed: F,
    options: ExportOptions,
}

impl<F: ReviewFeed> ExportOrchestrator<F> {
    pub fn new(feed: F, options: ExportOptions) -> Self {
        Self { feed, options }
    }

    /// Fetch pages 1..=max_pages, stopping early at the first empty page.
    ///
    /// `on_page` is called with the page number before each request. Any
    /// fetch or parse error aborts the loop.
    pub async fn collect<P>(&self, app_id: &str, mut on_page: P) -> Result<CollectedPages, ExportError>
    where
        P: FnMut(u32),
    {
        let max_pages = self.options.max_pages;
        let mut reviews = Vec::new();
        let mut pages_fetched = 0;
        let mut stop_reason = StopReason::CeilingReached;

        for page in 1..=max_pages {
            on_page(page);
            info!(
                source = self.feed.source_name(),
                app_id,
                country = %self.options.country,
                page,
                "Fetching review page"
            );

            let xml = self.feed.fetch_page(app_id, &self.options.country, page).await?;
            pages_fetched = page;

            let page_reviews = parse_reviews(&xml)?;
            if page_reviews.is_empty() {
                info!(page, "No more reviews found, stopping pagination");
                stop_reason = StopReason::Exhausted;
                break;
            }

            info!(page, reviews = page_reviews.len(), "Parsed review page");
            reviews.extend(page_reviews);

            // Courtesy pause between requests, not a rate limiter
            if page < max_pages && !self.options.request_delay.is_zero() {
                sleep(self.options.request_delay).await;
            }
        }

        if stop_reason == StopReason::CeilingReached {
            info!(max_pages, "Reached page ceiling");
        }

        Ok(CollectedPages {
            reviews,
            pages_fetched,
            stop_reason,
        })
    }

    /// Run the whole export and write the output file
    pub async fn run<P>(&self, on_page: P) -> Result<ExportSummary, ExportError>
    where
        P: FnMut(u32),
    {
        let app_id = extract_app_id(&self.options.app)?;
        let collected = self.collect(&app_id, on_page).await?;

        let fetched = collected.reviews.len();
        let unique = remove_duplicate_reviews(collected.reviews);
        let duplicates_removed = fetched - unique.len();

        let rows = normalize_reviews(unique);
        let unparsed_timestamps = rows.iter().filter(|r| r.published_at.is_none()).count();
        if unparsed_timestamps > 0 {
            warn!(count = unparsed_timestamps, "Some review timestamps could not be parsed and were left empty");
        }

        let format = write_reviews(&self.options.output_file, &rows)?;

        info!(
            app_id = %app_id,
            pages = collected.pages_fetched,
            fetched,
            duplicates_removed,
            exported = rows.len(),
            output = %self.options.output_file.display(),
            "Review export complete"
        );

        Ok(ExportSummary {
            app_id,
            country: self.options.country.clone(),
            pages_fetched: collected.pages_fetched,
            stop_reason: collected.stop_reason,
            fetched,
            duplicates_removed,
            exported: rows.len(),
            unparsed_timestamps,
            output_file: self.options.output_file.clone(),
            format,
        })
    }
}
