use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::unit::TemperatureUnit;

/// A searchable place from the static dataset: a city, an airport, etc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecastEntry {
    pub day: NaiveDate,
    pub weather_code: i32,
    pub temperature_max: f64,
    pub temperature_min: f64,
    /// Zero when the upstream payload carries no precipitation probability.
    pub precipitation_chance: f64,
}

/// Seven-ish days of daily aggregates, in upstream chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyForecast {
    pub latitude: f64,
    pub longitude: f64,
    pub units: TemperatureUnit,
    pub entries: Vec<DailyForecastEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecastEntry {
    pub hour_index: u8,
    pub temperature: f64,
    pub precipitation_chance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecast {
    pub entries: Vec<HourlyForecastEntry>,
}

impl HourlyForecast {
    /// Upper bound on entries kept from the upstream series.
    pub const MAX_HOURS: usize = 24;
}
