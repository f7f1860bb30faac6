use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit system forwarded verbatim to the provider as the `units` query
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial, Units::Standard]
    }

    /// Temperature suffix for display purposes.
    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial, standard."
            )),
        }
    }
}

impl std::str::FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Units::try_from(s)
    }
}

/// Parameters for a single weather lookup. Built per call, never reused.
#[derive(Debug, Clone)]
pub struct WeatherQuery {
    /// City name as the provider expects it, e.g. "London" or "Kuala Lumpur".
    pub city: String,
    pub units: Units,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>, units: Units) -> Self {
        Self { city: city.into(), units }
    }
}

/// Shared temperature/humidity block of the provider's responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainMetrics {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: Option<f64>,
}

/// One entry of the `weather` array: headline plus longer description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub deg: Option<f64>,
}

/// Decoded `/weather` response: current conditions for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub name: String,
    pub dt: i64,
    pub main: MainMetrics,
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

impl WeatherData {
    /// Headline condition, e.g. "Clouds". The provider may send an empty
    /// `weather` array.
    pub fn condition(&self) -> Option<&str> {
        self.weather.first().map(|w| w.main.as_str())
    }

    pub fn description(&self) -> Option<&str> {
        self.weather.first().map(|w| w.description.as_str())
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
}

/// One 3-hour interval of the forecast list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    /// Provider-formatted timestamp, e.g. "2026-08-26 12:00:00".
    pub dt_txt: Option<String>,
    pub main: MainMetrics,
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

impl ForecastEntry {
    pub fn condition(&self) -> Option<&str> {
        self.weather.first().map(|w| w.main.as_str())
    }

    pub fn forecast_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
    }
}

/// Decoded `/forecast` response: city metadata plus an ordered sequence of
/// per-interval snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastData {
    pub city: City,
    pub list: Vec<ForecastEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_as_str_roundtrip() {
        for units in Units::all() {
            let s = units.as_str();
            let parsed = Units::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn units_parse_is_case_insensitive() {
        assert_eq!(Units::try_from("Imperial").unwrap(), Units::Imperial);
        assert_eq!(Units::try_from("METRIC").unwrap(), Units::Metric);
    }

    #[test]
    fn unknown_units_error() {
        let err = Units::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn decode_current_weather_response() {
        let body = r#"{
            "name": "London",
            "dt": 1756202400,
            "main": { "temp": 18.4, "feels_like": 17.9, "humidity": 72, "pressure": 1014 },
            "weather": [ { "main": "Clouds", "description": "scattered clouds" } ],
            "wind": { "speed": 4.1, "deg": 240 }
        }"#;

        let data: WeatherData = serde_json::from_str(body).expect("well-formed body must decode");

        assert_eq!(data.name, "London");
        assert_eq!(data.main.temp, 18.4);
        assert_eq!(data.main.humidity, 72);
        assert_eq!(data.condition(), Some("Clouds"));
        assert_eq!(data.description(), Some("scattered clouds"));
        assert!(data.observed_at().is_some());
    }

    #[test]
    fn decode_forecast_response_preserves_order() {
        let body = r#"{
            "city": { "name": "George Town", "country": "MY" },
            "list": [
                {
                    "dt": 1756202400,
                    "dt_txt": "2026-08-26 12:00:00",
                    "main": { "temp": 31.0, "feels_like": 35.2, "humidity": 64, "pressure": null },
                    "weather": [ { "main": "Rain", "description": "light rain" } ],
                    "wind": { "speed": 2.5, "deg": null }
                },
                {
                    "dt": 1756213200,
                    "dt_txt": "2026-08-26 15:00:00",
                    "main": { "temp": 29.4, "feels_like": 33.0, "humidity": 70, "pressure": 1009 },
                    "weather": [ { "main": "Clouds", "description": "broken clouds" } ],
                    "wind": { "speed": 3.0, "deg": 180 }
                }
            ]
        }"#;

        let data: ForecastData = serde_json::from_str(body).expect("well-formed body must decode");

        assert_eq!(data.city.name, "George Town");
        assert_eq!(data.list.len(), 2);
        assert!(data.list[0].dt < data.list[1].dt);
        assert_eq!(data.list[0].condition(), Some("Rain"));
        assert_eq!(data.list[1].dt_txt.as_deref(), Some("2026-08-26 15:00:00"));
    }

    #[test]
    fn missing_required_field_fails_to_decode() {
        // No "main" block: must be rejected outright, never a partial value.
        let body = r#"{
            "name": "London",
            "dt": 1756202400,
            "weather": [],
            "wind": { "speed": 4.1, "deg": 240 }
        }"#;

        assert!(serde_json::from_str::<WeatherData>(body).is_err());
    }

    #[test]
    fn condition_is_none_for_empty_weather_array() {
        let body = r#"{
            "name": "London",
            "dt": 1756202400,
            "main": { "temp": 18.4, "feels_like": 17.9, "humidity": 72, "pressure": 1014 },
            "weather": [],
            "wind": { "speed": 4.1, "deg": null }
        }"#;

        let data: WeatherData = serde_json::from_str(body).expect("decode");
        assert_eq!(data.condition(), None);
    }
}
