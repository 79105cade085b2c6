mod chart;
mod config;
mod consts;
mod events;
mod graphql;
mod loader;
mod logging;
mod model;
mod pretty;
mod range;
mod session;
mod table;
mod ui;
mod viewport;

use crate::config::{Config, get_config_path, get_log_path};
use crate::graphql::GraphqlClient;
use crate::logging::LogTarget;
use crate::pretty::{print_cmd_error, print_cmd_info};
use crate::range::DateRange;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Terminal dashboard for Chonk collection transfer and holder stats
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

/// Overrides for the data source, on top of the config file.
#[derive(ClapArgs, Debug, Clone, Default)]
struct SourceArgs {
    /// GraphQL endpoint to query
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// API key sent in the X-GHOST-KEY header
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive dashboard
    Start {
        #[command(flatten)]
        source: SourceArgs,

        /// Disable background colors
        #[arg(long = "no-background", action = clap::ArgAction::SetTrue)]
        no_background: bool,
    },
    /// Fetch once and print the stats for a date range
    Snapshot {
        #[command(flatten)]
        source: SourceArgs,

        /// Start of the range, in percent of the timeline
        #[arg(long, value_name = "PCT", default_value_t = 0.0)]
        from: f64,

        /// End of the range, in percent of the timeline
        #[arg(long, value_name = "PCT", default_value_t = 100.0)]
        to: f64,
    },
    /// Save data source settings to the config file
    Configure {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of top holders to request
        #[arg(long, value_name = "N")]
        holder_limit: Option<u32>,
    },
    /// Delete the config file and return to defaults
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();

    match args.command {
        Command::Start {
            source,
            no_background,
        } => {
            // Logs go to a file so they do not draw over the dashboard
            logging::init(LogTarget::File, &get_log_path()?)?;
            let config = resolve_config(&config_path, source, None)?;
            let session = setup_session(&config)?;
            run_tui_mode(session, !no_background).await
        }
        Command::Snapshot { source, from, to } => {
            logging::init(LogTarget::Stderr, &get_log_path()?)?;
            let config = resolve_config(&config_path, source, None)?;
            let client = GraphqlClient::new(&config)?;
            if let Err(e) = run_headless_mode(&client, DateRange::new(from, to)).await {
                print_cmd_error!("Snapshot failed", "{}", e);
                return Err(e);
            }
            Ok(())
        }
        Command::Configure {
            source,
            holder_limit,
        } => {
            let config = resolve_config(&config_path, source, holder_limit)?;
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_info!(
                "Configuration saved",
                "Endpoint: {}\nHolder limit: {}\nWritten to {}",
                config.endpoint,
                config.holder_limit,
                config_path.display()
            );
            Ok(())
        }
        Command::Reset => {
            println!("Clearing configuration file...");
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}

/// Config file values with command-line overrides applied.
fn resolve_config(
    config_path: &std::path::Path,
    source: SourceArgs,
    holder_limit: Option<u32>,
) -> Result<Config, Box<dyn Error>> {
    let config = Config::load_or_default(config_path)
        .map_err(|e| format!("Failed to load config {}: {}", config_path.display(), e))?;
    Ok(config.with_overrides(source.endpoint, source.api_key, holder_limit))
}
