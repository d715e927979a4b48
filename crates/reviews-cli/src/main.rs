use clap::{ArgAction, Parser, Subcommand};
use commands::{config, export};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "appreviews")]
#[command(about = "Export App Store customer reviews for one app and storefront to a spreadsheet")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch reviews and write them to the output file (default command)
    #[command(long_about = "Fetch the most recent customer reviews for one app in one storefront, page by page, until an empty page or the page ceiling is reached. Duplicate rows are dropped and the table is written to the output file, replacing it if it exists. Settings come from built-in defaults, then the config file, then these flags.")]
    Export(export::ExportArgs),

    /// Show or create the configuration file
    #[command(long_about = "Manage the TOML configuration file. Running without a subcommand shows the effective configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show {
        /// Config file to read (defaults to the platform config directory)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Write a config file populated with the built-in defaults
    Init {
        /// Where to write the file (defaults to the platform config directory)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command.unwrap_or_else(|| Commands::Export(export::ExportArgs::default())) {
        Commands::Export(args) => export::run_export(args, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { config: None });
            config::run_config(cmd, &output)
        }
    }
}
