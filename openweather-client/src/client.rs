use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::Error,
    model::{ForecastData, WeatherData, WeatherQuery},
};

/// Production endpoint of the OpenWeather v2.5 API.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Asynchronous client for the OpenWeather current-weather and forecast
/// endpoints.
///
/// Holds the base URL, the APPID credential and a reusable HTTP transport.
/// Every call is single-shot: one request, one response, no retries and no
/// caching. Calls are independent of each other and may run concurrently.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different base URL, e.g. a mock server in tests
    /// or a provider-compatible proxy.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http: Client::new(),
        }
    }

    /// Current conditions for a city:
    /// `GET {base}/weather?q={city}&APPID={key}&units={units}`.
    pub async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherData, Error> {
        self.fetch("weather", query).await
    }

    /// 5-day/3-hour forecast for a city:
    /// `GET {base}/forecast?q={city}&APPID={key}&units={units}`.
    pub async fn forecast(&self, query: &WeatherQuery) -> Result<ForecastData, Error> {
        self.fetch("forecast", query).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &WeatherQuery,
    ) -> Result<T, Error> {
        let url = format!("{}/{endpoint}", self.base_url);

        debug!(endpoint, city = %query.city, units = %query.units, "requesting weather data");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.city.as_str()),
                ("APPID", self.api_key.as_str()),
                ("units", query.units.as_str()),
            ])
            .send()
            .await
            .map_err(Error::Network)?;

        let status = res.status();
        let body = res.text().await.map_err(Error::Network)?;

        if !status.is_success() {
            return Err(Error::Status { status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(Error::Decode)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Walk back to a char boundary so multibyte bodies never split mid-char.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &body[..end])
}
