use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use ph_weather_core::{Config, LookupError, WeatherService};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "ph-weather", version, about = "Current weather for places in the Philippines")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively edit the configuration file.
    Configure,

    /// Show current weather for a place.
    Show {
        /// City or municipality name, e.g. "Quezon City" or "City of Pasig".
        place: String,
    },

    /// List place names containing the query.
    Suggest {
        query: String,
    },

    /// List every known place.
    Places,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { place } => show(&place).await,
            Command::Suggest { query } => {
                let service = service()?;
                for name in service.suggest(&query).await {
                    println!("{name}");
                }
                report_degraded(&service);
                Ok(())
            }
            Command::Places => {
                let service = service()?;
                let directory = service.directory().await;
                for record in directory.records() {
                    println!(
                        "{:<32} {:>9.4} {:>9.4}",
                        record.cleaned, record.coordinates.latitude, record.coordinates.longitude
                    );
                }
                println!("\n{} places; {}", directory.len(), render::status(service.directory_status()));
                Ok(())
            }
        }
    }
}

fn service() -> anyhow::Result<WeatherService> {
    let config = Config::load()?;
    WeatherService::from_config(&config)
}

fn report_degraded(service: &WeatherService) {
    if service.directory_status().using_fallback {
        eprintln!("note: {}", render::status(service.directory_status()));
    }
}

async fn show(place: &str) -> anyhow::Result<()> {
    let service = service()?;

    let result = service.lookup(place).await;
    report_degraded(&service);

    match result {
        Ok(obs) => {
            println!("{}", render::observation(&obs));
            Ok(())
        }
        Err(err @ LookupError::PlaceNotFound(_)) => {
            let suggestions = service.suggest(place.trim()).await;
            if !suggestions.is_empty() {
                eprintln!("Did you mean: {}?", suggestions.join(", "));
            }
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load().unwrap_or_else(|err| {
        eprintln!("warning: {err:#}; starting from defaults");
        Config::default()
    });

    let directory_url = Text::new("Place registry URL:").with_default(cfg.directory_url()).prompt()?;
    let weather_url = Text::new("Weather endpoint URL:").with_default(cfg.weather_url()).prompt()?;
    let country_code = Text::new("Country code (ISO, two letters):").with_default(cfg.country_code()).prompt()?;
    let country_name = Text::new("Country name:").with_default(cfg.country_name()).prompt()?;
    let suggestion_limit = CustomType::<usize>::new("Suggestions to show:")
        .with_default(cfg.suggestion_limit())
        .with_error_message("Please type a whole number")
        .prompt()?;
    let timeout_secs = CustomType::<u64>::new("HTTP timeout in seconds:")
        .with_default(cfg.timeout().as_secs())
        .with_error_message("Please type a whole number")
        .prompt()?;

    cfg.directory_url = Some(directory_url.trim().to_string());
    cfg.weather_url = Some(weather_url.trim().to_string());
    apply_country(&mut cfg, &country_code, &country_name);
    cfg.suggestion_limit = Some(suggestion_limit);
    cfg.timeout_secs = Some(timeout_secs);

    cfg.validate()?;
    cfg.save()?;

    let path = Config::config_file_path().context("Configuration saved, but its path is unknown")?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn apply_country(cfg: &mut Config, code: &str, name: &str) {
    cfg.country_code = Some(code.trim().to_ascii_uppercase());
    cfg.country_name = Some(name.trim().to_string());
}
