//! Turns raw Open-Meteo payloads into the service's own forecast types.
//!
//! Payloads are parsed strictly into the `Om*` structs below. A missing
//! required array, a short array or malformed JSON is a [`MappingError`];
//! a partially filled forecast is never returned.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{DailyForecastEntry, HourlyForecast, HourlyForecastEntry, WeeklyForecast};
use crate::unit::TemperatureUnit;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Failed to parse Open-Meteo forecast JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Open-Meteo payload is missing {field}[{index}]")]
    MissingValue { field: &'static str, index: usize },

    #[error("Open-Meteo payload contained no daily entries")]
    EmptySeries,
}

#[derive(Debug, Deserialize)]
struct OmWeeklyResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<NaiveDate>,
    #[serde(alias = "weather_code")]
    weathercode: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    /// Absent when the field was not requested or the model has no data.
    precipitation_probability_max: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct OmHourlyResponse {
    hourly: OmHourly,
}

// weathercode is requested upstream but not carried into the hourly entries.
#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    precipitation: Vec<f64>,
}

/// Map a weekly payload.
///
/// Latitude and longitude come from the upstream echo in the payload root;
/// the caller's coordinates are only used when the payload omits them.
pub fn map_weekly(
    raw: &str,
    units: TemperatureUnit,
    latitude: f64,
    longitude: f64,
) -> Result<WeeklyForecast, MappingError> {
    let parsed: OmWeeklyResponse = serde_json::from_str(raw)?;
    let daily = parsed.daily;

    if daily.time.is_empty() {
        return Err(MappingError::EmptySeries);
    }

    let entries = daily
        .time
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let precipitation_chance = match &daily.precipitation_probability_max {
                Some(values) => {
                    value_at(values, "daily.precipitation_probability_max", i)?.unwrap_or(0.0)
                }
                None => 0.0,
            };

            Ok(DailyForecastEntry {
                day: *day,
                weather_code: value_at(&daily.weathercode, "daily.weathercode", i)?,
                temperature_max: value_at(
                    &daily.temperature_2m_max,
                    "daily.temperature_2m_max",
                    i,
                )?,
                temperature_min: value_at(
                    &daily.temperature_2m_min,
                    "daily.temperature_2m_min",
                    i,
                )?,
                precipitation_chance,
            })
        })
        .collect::<Result<Vec<_>, MappingError>>()?;

    Ok(WeeklyForecast {
        latitude: parsed.latitude.unwrap_or(latitude),
        longitude: parsed.longitude.unwrap_or(longitude),
        units,
        entries,
    })
}

/// Map an hourly payload, keeping at most [`HourlyForecast::MAX_HOURS`] entries.
pub fn map_hourly(raw: &str) -> Result<HourlyForecast, MappingError> {
    let parsed: OmHourlyResponse = serde_json::from_str(raw)?;
    let hourly = parsed.hourly;

    let count = hourly.time.len().min(HourlyForecast::MAX_HOURS);

    let entries = (0..count)
        .map(|i| {
            Ok(HourlyForecastEntry {
                // count <= MAX_HOURS, fits in u8
                hour_index: i as u8,
                temperature: value_at(&hourly.temperature_2m, "hourly.temperature_2m", i)?,
                precipitation_chance: value_at(&hourly.precipitation, "hourly.precipitation", i)?,
            })
        })
        .collect::<Result<Vec<_>, MappingError>>()?;

    Ok(HourlyForecast { entries })
}

fn value_at<T: Copy>(values: &[T], field: &'static str, index: usize) -> Result<T, MappingError> {
    values
        .get(index)
        .copied()
        .ok_or(MappingError::MissingValue { field, index })
}
