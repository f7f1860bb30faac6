use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use openweather_client::{Config, ForecastEntry, Units, WeatherApiClient, WeatherData, WeatherQuery};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "OpenWeather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and default units.
    Configure,

    /// Show current weather for a city.
    Current {
        /// City name, e.g. "London".
        city: String,

        /// Unit system: metric, imperial or standard. Defaults to the
        /// configured value.
        #[arg(long)]
        units: Option<String>,
    },

    /// Show the 5-day/3-hour forecast for a city.
    Forecast {
        /// City name, e.g. "London".
        city: String,

        /// Unit system: metric, imperial or standard. Defaults to the
        /// configured value.
        #[arg(long)]
        units: Option<String>,

        /// Show at most this many forecast entries.
        #[arg(long, default_value_t = 8)]
        limit: usize,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Current { city, units } => {
                let (client, query) = prepare(city, units)?;
                let data = client
                    .current_weather(&query)
                    .await
                    .context("Could not fetch current weather")?;
                print_current(&data, query.units);
                Ok(())
            }
            Command::Forecast { city, units, limit } => {
                let (client, query) = prepare(city, units)?;
                let data =
                    client.forecast(&query).await.context("Could not fetch forecast")?;

                println!("Forecast for {}, {}:", data.city.name, data.city.country);
                for entry in data.list.iter().take(limit) {
                    print_forecast_entry(entry, query.units);
                }
                Ok(())
            }
        }
    }
}

/// Build the client and query from CLI arguments plus stored configuration.
fn prepare(city: String, units: Option<String>) -> Result<(WeatherApiClient, WeatherQuery)> {
    let config = Config::load()?;

    let units = match units {
        Some(s) => Units::try_from(s.as_str())?,
        None => config.default_units(),
    };

    let client = WeatherApiClient::new(config.api_key()?.to_owned());
    Ok((client, WeatherQuery::new(city, units)))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    if config.is_configured() {
        println!("An API key is already configured; it will be replaced.");
    }

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let units = Select::new("Default unit system:", Units::all().to_vec())
        .prompt()
        .context("Failed to read unit selection")?;

    config.set_api_key(api_key);
    config.set_units(units);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn print_current(data: &WeatherData, units: Units) {
    let suffix = units.temperature_suffix();

    println!("Weather in {}:", data.name);
    if let (Some(main), Some(desc)) = (data.condition(), data.description()) {
        println!("  Condition:   {main} ({desc})");
    }
    println!(
        "  Temperature: {:.1}{suffix} (feels like {:.1}{suffix})",
        data.main.temp, data.main.feels_like
    );
    println!("  Humidity:    {}%", data.main.humidity);
    println!("  Wind:        {:.1} {}", data.wind.speed, wind_suffix(units));
    if let Some(observed) = data.observed_at() {
        println!("  Observed:    {}", observed.format("%Y-%m-%d %H:%M UTC"));
    }
}

fn print_forecast_entry(entry: &ForecastEntry, units: Units) {
    let when = match (&entry.dt_txt, entry.forecast_time()) {
        (Some(txt), _) => txt.clone(),
        (None, Some(dt)) => dt.format("%Y-%m-%d %H:%M").to_string(),
        (None, None) => "unknown time".to_string(),
    };

    let day = entry
        .forecast_time()
        .map(|dt| dt.format("%a").to_string())
        .unwrap_or_else(|| "???".to_string());

    println!(
        "  {day} {when}  {:>6.1}{}  {}",
        entry.main.temp,
        units.temperature_suffix(),
        entry.condition().unwrap_or("-"),
    );
}

fn wind_suffix(units: Units) -> &'static str {
    match units {
        Units::Imperial => "mph",
        Units::Metric | Units::Standard => "m/s",
    }
}
