//! Core library for the forecast service.
//!
//! This crate defines:
//! - Configuration handling
//! - The read-only location index behind location search
//! - The forecast pipeline: unit resolution, upstream request building,
//!   response normalization and the gateway tying them together
//! - Shared domain models (locations, weekly and hourly forecasts)
//!
//! It is used by `forecast-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod gateway;
pub mod location;
pub mod model;
pub mod provider;
pub mod unit;
pub mod weather_code;

pub use config::Config;
pub use gateway::{ForecastError, ForecastGateway, UpstreamFailure};
pub use location::{DatasetError, LocationIndex};
pub use model::{
    DailyForecastEntry, HourlyForecast, HourlyForecastEntry, Location, WeeklyForecast,
};
pub use provider::{
    FetchError, ForecastRequestBuilder, HttpFetch, MappingError, ReqwestFetcher, Url,
};
pub use unit::TemperatureUnit;
pub use weather_code::describe_weather_code;
