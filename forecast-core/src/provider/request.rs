use reqwest::Url;

use crate::unit::TemperatureUnit;

const WEEKLY_DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,weathercode,precipitation_probability_max";
const HOURLY_FIELDS: &str = "temperature_2m,precipitation,weathercode";

/// Builds Open-Meteo forecast URLs from coordinates and a resolved unit.
///
/// Pure: no I/O and no coordinate validation. Out-of-range coordinates are
/// left for the upstream to reject.
#[derive(Debug, Clone)]
pub struct ForecastRequestBuilder {
    base: Url,
}

impl ForecastRequestBuilder {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn build_weekly(&self, latitude: f64, longitude: f64, unit: TemperatureUnit) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("latitude", &latitude.to_string())
            .append_pair("longitude", &longitude.to_string())
            .append_pair("daily", WEEKLY_DAILY_FIELDS)
            .append_pair("temperature_unit", unit.as_str())
            .append_pair("timezone", "auto");
        url
    }

    /// Hourly requests carry no unit: the upstream default applies.
    pub fn build_hourly(&self, latitude: f64, longitude: f64) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("latitude", &latitude.to_string())
            .append_pair("longitude", &longitude.to_string())
            .append_pair("hourly", HOURLY_FIELDS)
            .append_pair("forecast_days", "1")
            .append_pair("timezone", "auto");
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn builder() -> ForecastRequestBuilder {
        ForecastRequestBuilder::new(Url::parse("https://api.open-meteo.com/v1/forecast").unwrap())
    }

    fn params(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn weekly_request_carries_fields_unit_and_timezone() {
        let url = builder().build_weekly(52.52, 13.405, TemperatureUnit::Fahrenheit);
        let p = params(&url);

        assert_eq!(url.path(), "/v1/forecast");
        assert_eq!(p["latitude"], "52.52");
        assert_eq!(p["longitude"], "13.405");
        assert_eq!(
            p["daily"],
            "temperature_2m_max,temperature_2m_min,weathercode,precipitation_probability_max"
        );
        assert_eq!(p["temperature_unit"], "fahrenheit");
        assert_eq!(p["timezone"], "auto");
        assert!(!p.contains_key("hourly"));
    }

    #[test]
    fn hourly_request_has_no_unit_and_one_day() {
        let url = builder().build_hourly(-33.8688, 151.2093);
        let p = params(&url);

        assert_eq!(p["latitude"], "-33.8688");
        assert_eq!(p["longitude"], "151.2093");
        assert_eq!(p["hourly"], "temperature_2m,precipitation,weathercode");
        assert_eq!(p["forecast_days"], "1");
        assert_eq!(p["timezone"], "auto");
        assert!(!p.contains_key("temperature_unit"));
        assert!(!p.contains_key("daily"));
    }

    #[test]
    fn out_of_range_coordinates_pass_through() {
        let url = builder().build_hourly(123.0, -500.5);
        let p = params(&url);

        assert_eq!(p["latitude"], "123");
        assert_eq!(p["longitude"], "-500.5");
    }

    #[test]
    fn builder_keeps_injected_base() {
        let b = ForecastRequestBuilder::new(Url::parse("http://127.0.0.1:4000/mock").unwrap());
        let url = b.build_weekly(1.0, 2.0, TemperatureUnit::Celsius);

        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(4000));
        assert_eq!(url.path(), "/mock");
    }
}
