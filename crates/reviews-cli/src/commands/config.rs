use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use reviews_config::{Config, PathManager};
use serde_json::json;
use std::path::{Path, PathBuf};

pub fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { config } => show_config(config.as_deref(), output),
        crate::ConfigCommands::Init { config, force } => init_config(config.as_deref(), force, output),
    }
}

fn config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => PathManager::default().config_file(),
    }
}

/// Load the effective configuration.
///
/// An explicitly named file must exist; the default location falls back to
/// the built-in defaults when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = config_path(explicit);

    if explicit.is_some() && !path.exists() {
        return Err(color_eyre::eyre::eyre!("Config file not found: {}", path.display()));
    }

    let config = Config::load_or_default(&path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", path.display(), e))?;

    tracing::debug!(path = %path.display(), exists = path.exists(), "Loaded configuration");
    Ok(config)
}

fn show_config(explicit: Option<&Path>, output: &Output) -> Result<()> {
    let path = config_path(explicit);
    let config = load_config(explicit)?;
    let source = if path.exists() {
        path.display().to_string()
    } else {
        "built-in defaults".to_string()
    };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "Configuration".bright_cyan().bold());
            println!("{} {}\n", "Source:".bright_white(), source);

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

            table.add_row(vec!["app".to_string(), config.app.clone()]);
            table.add_row(vec!["country".to_string(), config.country.clone()]);
            table.add_row(vec!["max_pages".to_string(), config.max_pages.to_string()]);
            table.add_row(vec!["output_file".to_string(), config.output_file.display().to_string()]);
            table.add_row(vec!["request_delay_ms".to_string(), config.request_delay_ms.to_string()]);
            table.add_row(vec!["request_timeout_secs".to_string(), config.request_timeout_secs.to_string()]);
            println!("{}", table);

            if let Err(e) = config.validate() {
                output.warn(format!("Configuration is invalid: {}", e));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "source": source,
                "config": config,
                "valid": config.validate().is_ok(),
            }));
        }
    }

    Ok(())
}

fn init_config(explicit: Option<&Path>, force: bool, output: &Output) -> Result<()> {
    let path = config_path(explicit);

    if path.exists() && !force {
        output.warn(format!("Config file already exists at {}", path.display()));
        output.info("Use --force to overwrite it with the built-in defaults.");
        return Ok(());
    }

    Config::default()
        .save_to_file(&path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write config to {}: {}", path.display(), e))?;

    output.success(format!("Wrote default configuration to {}", path.display()));
    Ok(())
}
