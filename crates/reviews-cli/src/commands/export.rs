use super::config::load_config;
use crate::output::{Output, OutputFormat};
use clap::Args;
use color_eyre::eyre::Context;
use color_eyre::Result;
use reviews_config::Config;
use reviews_core::{ExportOptions, ExportOrchestrator, ExportSummary};
use reviews_sources::ItunesClient;
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// App Store URL or numeric app ID
    #[arg(long, value_name = "URL_OR_ID")]
    pub app: Option<String>,

    /// Two-letter storefront country code (e.g. gb, us)
    #[arg(long)]
    pub country: Option<String>,

    /// Highest page number to request
    #[arg(long, value_name = "N")]
    pub max_pages: Option<u32>,

    /// Destination file (.xlsx or .csv)
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Config file to read (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl ExportArgs {
    /// Flags take precedence over the config file
    fn apply(self, mut config: Config) -> Config {
        if let Some(app) = self.app {
            config.app = app;
        }
        if let Some(country) = self.country {
            config.country = country;
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(output_file) = self.output_file {
            config.output_file = output_file;
        }
        config
    }
}

pub async fn run_export(args: ExportArgs, output: &Output) -> Result<()> {
    tracing::debug!("Export command started");

    let config = load_config(args.config.as_deref())?;
    let config = args.apply(config);
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;

    let client = ItunesClient::new(config.request_timeout()).wrap_err("Failed to create HTTP client")?;
    let orchestrator = ExportOrchestrator::new(client, ExportOptions::from(&config));

    let summary = orchestrator
        .run(|page| output.info(format!("Fetching page {}...", page)))
        .await
        .wrap_err_with(|| format!("Review export for '{}' failed", config.app))?;

    report_summary(&summary, output);
    Ok(())
}

fn report_summary(summary: &ExportSummary, output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            output.info("");
            output.success("Done.");
            if summary.duplicates_removed > 0 {
                output.info(format!("Duplicate rows dropped: {}", summary.duplicates_removed));
            }
            if summary.unparsed_timestamps > 0 {
                output.warn(format!(
                    "{} review timestamps could not be parsed and were left empty",
                    summary.unparsed_timestamps
                ));
            }
            output.info(format!(
                "Total {} reviews fetched: {}",
                summary.country.to_uppercase(),
                summary.exported
            ));
            output.info(format!("Saved to file: {}", summary.output_file.display()));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "type": "summary",
                "app_id": summary.app_id,
                "country": summary.country,
                "pages_fetched": summary.pages_fetched,
                "stop_reason": summary.stop_reason.as_str(),
                "fetched": summary.fetched,
                "duplicates_removed": summary.duplicates_removed,
                "exported": summary.exported,
                "unparsed_timestamps": summary.unparsed_timestamps,
                "output_file": summary.output_file.display().to_string(),
                "format": summary.format.as_str(),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = ExportArgs {
            app: Some("123".to_string()),
            country: None,
            max_pages: Some(2),
            output_file: Some(PathBuf::from("out.csv")),
            config: None,
        };
        let config = args.apply(Config::default());

        assert_eq!(config.app, "123");
        assert_eq!(config.country, reviews_config::DEFAULT_COUNTRY);
        assert_eq!(config.max_pages, 2);
        assert_eq!(config.output_file, PathBuf::from("out.csv"));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let config = ExportArgs::default().apply(Config::default());
        assert_eq!(config, Config::default());
    }
}
