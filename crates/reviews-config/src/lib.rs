pub mod config;
pub mod paths;

pub use config::{
    Config, DEFAULT_APP, DEFAULT_COUNTRY, DEFAULT_MAX_PAGES, DEFAULT_OUTPUT_FILE,
    DEFAULT_REQUEST_DELAY_MS, DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use paths::PathManager;
