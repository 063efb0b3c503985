//! Version 1 wire shapes, decoupled from both the upstream schema and the
//! core types.

use chrono::NaiveDate;
use forecast_core::{
    DailyForecastEntry, HourlyForecast, HourlyForecastEntry, Location, TemperatureUnit,
    WeeklyForecast, describe_weather_code,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct LocationsBody {
    pub locations: Vec<LocationBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationBody {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airport_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub locations: usize,
}

#[derive(Debug, Serialize)]
pub struct WeeklyForecastBody {
    pub latitude: f64,
    pub longitude: f64,
    pub units: TemperatureUnit,
    pub forecast: Vec<DailyForecastBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecastBody {
    pub day: NaiveDate,
    pub weather_code: i32,
    pub description: &'static str,
    pub temperature: TemperatureBody,
    pub precipitation_chance: f64,
}

#[derive(Debug, Serialize)]
pub struct TemperatureBody {
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Serialize)]
pub struct HourlyForecastBody {
    pub hourly: Vec<HourBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourBody {
    pub hour: u8,
    pub temperature: f64,
    pub precipitation_chance: f64,
}

impl From<&Location> for LocationBody {
    fn from(loc: &Location) -> Self {
        Self {
            id: loc.id.clone(),
            name: loc.name.clone(),
            kind: loc.kind.clone(),
            state: loc.state.clone(),
            country: loc.country.clone(),
            latitude: loc.latitude,
            longitude: loc.longitude,
            airport_code: loc.airport_code.clone(),
        }
    }
}

impl From<&[Location]> for LocationsBody {
    fn from(locations: &[Location]) -> Self {
        Self {
            locations: locations.iter().map(LocationBody::from).collect(),
        }
    }
}

impl From<&DailyForecastEntry> for DailyForecastBody {
    fn from(entry: &DailyForecastEntry) -> Self {
        Self {
            day: entry.day,
            weather_code: entry.weather_code,
            description: describe_weather_code(entry.weather_code),
            temperature: TemperatureBody {
                max: entry.temperature_max,
                min: entry.temperature_min,
            },
            precipitation_chance: entry.precipitation_chance,
        }
    }
}

impl From<&WeeklyForecast> for WeeklyForecastBody {
    fn from(forecast: &WeeklyForecast) -> Self {
        Self {
            latitude: forecast.latitude,
            longitude: forecast.longitude,
            units: forecast.units,
            forecast: forecast.entries.iter().map(DailyForecastBody::from).collect(),
        }
    }
}

impl From<&HourlyForecastEntry> for HourBody {
    fn from(entry: &HourlyForecastEntry) -> Self {
        Self {
            hour: entry.hour_index,
            temperature: entry.temperature,
            precipitation_chance: entry.precipitation_chance,
        }
    }
}

impl From<&HourlyForecast> for HourlyForecastBody {
    fn from(forecast: &HourlyForecast) -> Self {
        Self {
            hourly: forecast.entries.iter().map(HourBody::from).collect(),
        }
    }
}
