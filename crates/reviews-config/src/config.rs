use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// Built-in run parameters. Edit these for a one-off export, or override them
// in config.toml / on the command line.
pub const DEFAULT_APP: &str = "https://apps.apple.com/us/app/meitu-ai-photo-video-editor/id416048305";
pub const DEFAULT_COUNTRY: &str = "gb"; // United Kingdom storefront
pub const DEFAULT_MAX_PAGES: u32 = 10; // The public feed stops serving after ~500 reviews
pub const DEFAULT_OUTPUT_FILE: &str = "meitu_gb_reviews.xlsx";
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Storefront URL or bare numeric app ID
    #[serde(default = "default_app")]
    pub app: String,
    /// Two-letter storefront country code
    #[serde(default = "default_country")]
    pub country: String,
    /// Highest page number to request
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Destination file; the extension selects xlsx or csv
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    /// Pause after each non-empty page
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_app() -> String {
    DEFAULT_APP.to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_request_delay_ms() -> u64 {
    DEFAULT_REQUEST_DELAY_MS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: default_app(),
            country: default_country(),
            max_pages: default_max_pages(),
            output_file: default_output_file(),
            request_delay_ms: default_request_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise use the built-in defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.app.trim().is_empty() {
            return Err(anyhow::anyhow!("app must be a storefront URL or numeric app ID"));
        }

        let country = self.country.trim();
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(anyhow::anyhow!(
                "country must be a two-letter storefront code, got '{}'",
                self.country
            ));
        }

        if self.max_pages == 0 {
            return Err(anyhow::anyhow!("max_pages must be at least 1"));
        }

        if self.output_file.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("output_file cannot be empty"));
        }

        Ok(())
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
