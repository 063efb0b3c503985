use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastGateway, LocationIndex};

use crate::{
    api::{HourlyForecastBody, WeeklyForecastBody},
    http::{self, AppState},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Location search and weather forecast service")]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set, e.g. "debug" or "forecast_core=trace".
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Config file; defaults to the platform config location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Listen address, overrides `server.listen` from the config.
        #[arg(long)]
        listen: Option<String>,
    },

    /// Search the location dataset by name or airport code.
    Search {
        query: String,
    },

    /// Show the weekly forecast for a coordinate.
    Week {
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        #[arg(allow_negative_numbers = true)]
        lon: f64,

        /// "metric"/"C" or "imperial"/"F"; anything else means celsius.
        #[arg(long, default_value = "metric")]
        units: String,
    },

    /// Show the next 24 hours for a coordinate.
    Hourly {
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },

    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Init { force } => {
                let path = match self.config {
                    Some(path) => path,
                    None => Config::config_file_path()?,
                };
                if path.exists() && !force {
                    bail!(
                        "Config file already exists: {}\nHint: pass --force to overwrite it.",
                        path.display()
                    );
                }
                Config::default().save_to(&path)?;
                println!("Wrote default config to {}", path.display());
            }
            Command::Serve { listen } => {
                let config = Config::resolve(self.config.as_deref())?;
                let state = AppState::from_config(&config)?;
                let listen = listen.unwrap_or_else(|| config.server.listen.clone());
                http::serve(&listen, state).await?;
            }
            Command::Search { query } => {
                if query.trim().is_empty() {
                    bail!("Search query cannot be empty.");
                }
                let config = Config::resolve(self.config.as_deref())?;
                let index = LocationIndex::from_path(&config.locations.path)?;

                let results = index.search(&query);
                if results.is_empty() {
                    println!("No locations found matching '{query}'.");
                }
                for loc in results {
                    let code = loc
                        .airport_code
                        .map(|c| format!(" [{c}]"))
                        .unwrap_or_default();
                    println!(
                        "{}{code} - {}, {}, {} ({:.4}, {:.4})",
                        loc.name, loc.kind, loc.state, loc.country, loc.latitude, loc.longitude
                    );
                }
            }
            Command::Week { lat, lon, units } => {
                let config = Config::resolve(self.config.as_deref())?;
                let gateway = ForecastGateway::from_config(&config)?;

                let forecast = gateway.get_weekly(lat, lon, &units).await?;
                let body = serde_json::to_string_pretty(&WeeklyForecastBody::from(&forecast))
                    .context("Failed to render weekly forecast")?;
                println!("{body}");
            }
            Command::Hourly { lat, lon } => {
                let config = Config::resolve(self.config.as_deref())?;
                let gateway = ForecastGateway::from_config(&config)?;

                let forecast = gateway.get_hourly(lat, lon).await?;
                let body = serde_json::to_string_pretty(&HourlyForecastBody::from(&forecast))
                    .context("Failed to render hourly forecast")?;
                println!("{body}");
            }
        }

        Ok(())
    }
}
