//! Fingertips CLI binary.
//!
//! Provides a command-line interface to the Fingertips public-health API.

mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fingertips::{FingertipsClient, TransportConfig};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fingertips")]
#[command(about = "Public-health indicators from the Fingertips API", long_about = None)]
#[command(version)]
struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "FINGERTIPS_BASE_URL")]
    base_url: Option<String>,

    /// Maximum number of rows to print
    #[arg(short, long, global = true, default_value = "20")]
    limit: usize,

    /// Fail on request errors instead of printing an empty table
    #[arg(long, global = true)]
    strict: bool,

    /// Log request details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all profiles
    Profiles,

    /// List the indicators of a profile
    Indicators {
        /// Profile ID
        #[arg(short, long)]
        profile_id: i64,
    },

    /// List all area types
    AreaTypes,

    /// List the areas of an area type
    Areas {
        /// Area type ID
        #[arg(short, long)]
        area_type_id: i64,
    },

    /// Fetch indicator values at an area type
    Data {
        /// Indicator ID
        #[arg(short, long)]
        indicator_id: i64,

        /// Area type ID
        #[arg(short, long)]
        area_type_id: i64,

        /// Only areas within this parent area
        #[arg(short, long)]
        parent_area_code: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // clap already folds FINGERTIPS_BASE_URL into --base-url
    let config = match cli.base_url {
        Some(url) => TransportConfig::new(url),
        None => TransportConfig::from_env()?,
    };
    tracing::debug!(base_url = %config.base_url, "Using Fingertips API");
    let client = FingertipsClient::with_config(config)?;
    let opts = output::Options {
        limit: cli.limit,
        strict: cli.strict,
    };

    match cli.command {
        Commands::Profiles => cmd::catalog::profiles(&client, &opts).await?,
        Commands::Indicators { profile_id } => {
            cmd::catalog::indicators(&client, profile_id, &opts).await?;
        }
        Commands::AreaTypes => cmd::catalog::area_types(&client, &opts).await?,
        Commands::Areas { area_type_id } => {
            cmd::catalog::areas(&client, area_type_id, &opts).await?;
        }
        Commands::Data {
            indicator_id,
            area_type_id,
            parent_area_code,
        } => {
            cmd::data::indicator_data(
                &client,
                indicator_id,
                area_type_id,
                parent_area_code.as_deref(),
                &opts,
            )
            .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_data_command() {
        let cli = Cli::try_parse_from([
            "fingertips",
            "data",
            "--indicator-id",
            "90630",
            "--area-type-id",
            "152",
            "--parent-area-code",
            "E54000008",
            "--limit",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.limit, 5);
        assert!(!cli.strict);
        match cli.command {
            Commands::Data {
                indicator_id,
                area_type_id,
                parent_area_code,
            } => {
                assert_eq!(indicator_id, 90630);
                assert_eq!(area_type_id, 152);
                assert_eq!(parent_area_code.as_deref(), Some("E54000008"));
            }
            _ => panic!("expected data command"),
        }
    }

    #[test]
    fn test_parse_areas_command() {
        let cli = Cli::try_parse_from(["fingertips", "--strict", "areas", "-a", "9"]).unwrap();
        assert!(cli.strict);
        assert!(matches!(cli.command, Commands::Areas { area_type_id: 9 }));
    }
}
