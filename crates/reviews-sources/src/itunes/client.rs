use crate::error::FeedError;
use crate::traits::ReviewFeed;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub const FEED_BASE_URL: &str = "https://itunes.apple.com";
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Build the customer-reviews feed URL for one page, newest reviews first
pub fn feed_url(base_url: &str, app_id: &str, country: &str, page: u32) -> String {
    format!(
        "{}/{}/rss/customerreviews/page={}/id={}/sortby=mostrecent/xml",
        base_url.trim_end_matches('/'),
        country,
        page,
        app_id
    )
}

/// Client for the public iTunes customer-reviews RSS feed
pub struct ItunesClient {
    client: Client,
    base_url: String,
}

impl ItunesClient {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        Self::with_base_url(FEED_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn page_url(&self, app_id: &str, country: &str, page: u32) -> String {
        feed_url(&self.base_url, app_id, country, page)
    }

    /// Fetch one feed page as XML text
    pub async fn fetch_reviews_xml(&self, app_id: &str, country: &str, page: u32) -> Result<String, FeedError> {
        let url = self.page_url(app_id, country, page);
        debug!(url = %url, page, "Requesting review feed page");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Http { status, url, body });
        }

        let body = response.text().await?;
        debug!(page, bytes = body.len(), "Received review feed page");
        Ok(body)
    }
}

#[async_trait]
impl ReviewFeed for ItunesClient {
    fn source_name(&self) -> &str {
        "itunes"
    }

    async fn fetch_page(&self, app_id: &str, country: &str, page: u32) -> Result<String, FeedError> {
        self.fetch_reviews_xml(app_id, country, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve a single canned HTTP response and hand back the raw request
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/xml; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            tx.send(String::from_utf8_lossy(&request).into_owned()).unwrap();
        });

        (format!("http://{}", addr), rx)
    }

    #[test]
    fn test_feed_url_layout() {
        assert_eq!(
            feed_url(FEED_BASE_URL, "416048305", "gb", 3),
            "https://itunes.apple.com/gb/rss/customerreviews/page=3/id=416048305/sortby=mostrecent/xml"
        );
    }

    #[test]
    fn test_feed_url_ignores_trailing_slash() {
        assert_eq!(
            feed_url("http://localhost:8080/", "1", "us", 1),
            "http://localhost:8080/us/rss/customerreviews/page=1/id=1/sortby=mostrecent/xml"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_sends_user_agent() {
        let (base_url, requests) = serve_once("200 OK", "<feed/>");
        let client = ItunesClient::with_base_url(base_url, Duration::from_secs(5)).unwrap();

        let body = client.fetch_page("416048305", "gb", 2).await.unwrap();
        assert_eq!(body, "<feed/>");

        let request = requests.recv().unwrap();
        assert!(request.starts_with("GET /gb/rss/customerreviews/page=2/id=416048305/sortby=mostrecent/xml "));
        assert!(request.to_ascii_lowercase().contains("user-agent: mozilla/5.0"));
    }

    #[tokio::test]
    async fn test_fetch_fails_on_error_status() {
        let (base_url, _requests) = serve_once("503 Service Unavailable", "try later");
        let client = ItunesClient::with_base_url(base_url, Duration::from_secs(5)).unwrap();

        let err = client.fetch_page("1", "us", 1).await.unwrap_err();
        match err {
            FeedError::Http { status, body, .. } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "try later");
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }
}
