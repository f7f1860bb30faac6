//! Client library for the OpenWeather HTTP API.
//!
//! This crate defines:
//! - A thin async client over the `weather` and `forecast` endpoints
//! - Typed query and response models
//! - An error taxonomy separating transport, HTTP-status and decode failures
//! - Configuration & credentials handling
//!
//! It is used by `openweather-cli`, but can also be reused by other binaries
//! or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use client::{DEFAULT_BASE_URL, WeatherApiClient};
pub use config::Config;
pub use error::Error;
pub use model::{ForecastData, ForecastEntry, Units, WeatherData, WeatherQuery};
