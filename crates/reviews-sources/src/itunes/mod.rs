pub mod app_id;
pub mod client;
pub mod parser;

pub use app_id::extract_app_id;
pub use client::ItunesClient;
pub use parser::parse_reviews;
