use std::sync::Arc;

use thiserror::Error;

use crate::{
    Config,
    model::{HourlyForecast, WeeklyForecast},
    provider::{
        FetchError, ForecastRequestBuilder, HttpFetch, MappingError, ReqwestFetcher, map_hourly,
        map_weekly,
    },
    unit::TemperatureUnit,
};

/// What went wrong on the way to a forecast.
#[derive(Debug, Error)]
pub enum UpstreamFailure {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Gateway outcome for a failed forecast. Weekly failures surface as
/// service-unavailable, hourly failures as an upstream error; the cause is
/// kept for logging only.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Weather service is currently unavailable: {0}")]
    ServiceUnavailable(#[source] UpstreamFailure),

    #[error("Upstream weather provider error: {0}")]
    UpstreamError(#[source] UpstreamFailure),
}

impl ForecastError {
    pub fn cause(&self) -> &UpstreamFailure {
        match self {
            ForecastError::ServiceUnavailable(cause) | ForecastError::UpstreamError(cause) => cause,
        }
    }
}

/// Build → fetch → map, one upstream call per forecast. No retries and no
/// caching: a failed call is final.
#[derive(Debug, Clone)]
pub struct ForecastGateway {
    requests: ForecastRequestBuilder,
    fetcher: Arc<dyn HttpFetch>,
}

impl ForecastGateway {
    pub fn new(requests: ForecastRequestBuilder, fetcher: Arc<dyn HttpFetch>) -> Self {
        Self { requests, fetcher }
    }

    /// Gateway against the configured upstream using reqwest.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let requests = ForecastRequestBuilder::new(config.forecast_url()?);
        Ok(Self::new(requests, Arc::new(ReqwestFetcher::new())))
    }

    pub async fn get_weekly(
        &self,
        latitude: f64,
        longitude: f64,
        unit_token: &str,
    ) -> Result<WeeklyForecast, ForecastError> {
        let unit = TemperatureUnit::resolve(unit_token);

        self.fetch_weekly(latitude, longitude, unit).await.map_err(|cause| {
            tracing::warn!(latitude, longitude, %unit, error = %cause, "weekly forecast failed");
            ForecastError::ServiceUnavailable(cause)
        })
    }

    pub async fn get_hourly(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<HourlyForecast, ForecastError> {
        self.fetch_hourly(latitude, longitude).await.map_err(|cause| {
            tracing::warn!(latitude, longitude, error = %cause, "hourly forecast failed");
            ForecastError::UpstreamError(cause)
        })
    }

    async fn fetch_weekly(
        &self,
        latitude: f64,
        longitude: f64,
        unit: TemperatureUnit,
    ) -> Result<WeeklyForecast, UpstreamFailure> {
        let url = self.requests.build_weekly(latitude, longitude, unit);
        tracing::debug!(%url, "requesting weekly forecast");

        let body = self.fetcher.fetch(&url).await?;
        Ok(map_weekly(&body, unit, latitude, longitude)?)
    }

    async fn fetch_hourly(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<HourlyForecast, UpstreamFailure> {
        let url = self.requests.build_hourly(latitude, longitude);
        tracing::debug!(%url, "requesting hourly forecast");

        let body = self.fetcher.fetch(&url).await?;
        Ok(map_hourly(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::Url;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Replays a canned outcome and records requested URLs.
    #[derive(Debug)]
    struct FakeFetcher {
        outcome: Result<String, (u16, String)>,
        seen: Mutex<Vec<Url>>,
    }

    impl FakeFetcher {
        fn ok(body: impl Into<String>) -> Arc<Self> {
            Arc::new(Self { outcome: Ok(body.into()), seen: Mutex::new(Vec::new()) })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                outcome: Err((status, "boom".to_string())),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<Url> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpFetch for FakeFetcher {
        async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
            self.seen.lock().unwrap().push(url.clone());
            match &self.outcome {
                Ok(body) => Ok(body.clone()),
                Err((0, msg)) => Err(FetchError::Transport(msg.clone())),
                Err((status, body)) => Err(FetchError::Status {
                    status: *status,
                    body: body.clone(),
                }),
            }
        }
    }

    fn gateway(fetcher: Arc<FakeFetcher>) -> ForecastGateway {
        let base = Url::parse("https://api.open-meteo.com/v1/forecast").unwrap();
        ForecastGateway::new(ForecastRequestBuilder::new(base), fetcher)
    }

    fn weekly_body() -> String {
        json!({
            "latitude": 52.52,
            "longitude": 13.41,
            "daily": {
                "time": ["2025-06-27", "2025-06-28"],
                "temperature_2m_max": [77.0, 79.5],
                "temperature_2m_min": [59.0, 60.1],
                "weathercode": [1, 2],
                "precipitation_probability_max": [5, 40]
            }
        })
        .to_string()
    }

    fn hourly_body() -> String {
        json!({
            "hourly": {
                "time": ["2025-06-27T00:00", "2025-06-27T01:00"],
                "temperature_2m": [14.2, 13.9],
                "precipitation": [0.0, 0.3],
                "weathercode": [0, 61]
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn weekly_resolves_unit_and_maps() {
        let fetcher = FakeFetcher::ok(weekly_body());
        let forecast = gateway(fetcher.clone())
            .get_weekly(52.52, 13.405, "imperial")
            .await
            .unwrap();

        assert_eq!(forecast.units, TemperatureUnit::Fahrenheit);
        assert_eq!(forecast.entries.len(), 2);
        assert_eq!(forecast.entries[1].precipitation_chance, 40.0);

        let seen = fetcher.seen();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].query().unwrap().contains("temperature_unit=fahrenheit"));
    }

    #[tokio::test]
    async fn weekly_unknown_unit_falls_back_to_celsius() {
        let fetcher = FakeFetcher::ok(weekly_body());
        let forecast = gateway(fetcher.clone()).get_weekly(52.52, 13.405, "kelvin").await.unwrap();

        assert_eq!(forecast.units, TemperatureUnit::Celsius);
        assert!(fetcher.seen()[0].query().unwrap().contains("temperature_unit=celsius"));
    }

    #[tokio::test]
    async fn weekly_fetch_failure_is_service_unavailable() {
        let err = gateway(FakeFetcher::failing(500)).get_weekly(1.0, 2.0, "C").await.unwrap_err();

        assert!(matches!(err, ForecastError::ServiceUnavailable(UpstreamFailure::Fetch(_))));
    }

    #[tokio::test]
    async fn weekly_transport_failure_is_service_unavailable() {
        let err = gateway(FakeFetcher::failing(0)).get_weekly(1.0, 2.0, "C").await.unwrap_err();

        assert!(matches!(
            err.cause(),
            UpstreamFailure::Fetch(FetchError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn weekly_mapping_failure_is_service_unavailable() {
        let err = gateway(FakeFetcher::ok("{}")).get_weekly(1.0, 2.0, "C").await.unwrap_err();

        assert!(matches!(err, ForecastError::ServiceUnavailable(UpstreamFailure::Mapping(_))));
    }

    #[tokio::test]
    async fn hourly_maps_without_unit_parameter() {
        let fetcher = FakeFetcher::ok(hourly_body());
        let forecast = gateway(fetcher.clone()).get_hourly(52.52, 13.405).await.unwrap();

        assert_eq!(forecast.entries.len(), 2);
        assert_eq!(forecast.entries[1].precipitation_chance, 0.3);
        assert!(!fetcher.seen()[0].query().unwrap().contains("temperature_unit"));
    }

    #[tokio::test]
    async fn hourly_fetch_failure_is_upstream_error() {
        let err = gateway(FakeFetcher::failing(503)).get_hourly(1.0, 2.0).await.unwrap_err();

        assert!(matches!(err, ForecastError::UpstreamError(UpstreamFailure::Fetch(_))));
    }

    #[tokio::test]
    async fn hourly_mapping_failure_is_upstream_error() {
        let err = gateway(FakeFetcher::ok("not json")).get_hourly(1.0, 2.0).await.unwrap_err();

        assert!(matches!(err, ForecastError::UpstreamError(UpstreamFailure::Mapping(_))));
    }

    #[tokio::test]
    async fn from_config_talks_to_configured_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param(
                "daily",
                "temperature_2m_max,temperature_2m_min,weathercode,precipitation_probability_max",
            ))
            .and(query_param("temperature_unit", "celsius"))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_string(weekly_body()))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("hourly", "temperature_2m,precipitation,weathercode"))
            .and(query_param("forecast_days", "1"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = Config::default();
        config.upstream.forecast_url = format!("{}/v1/forecast", server.uri());
        let gateway = ForecastGateway::from_config(&config).unwrap();

        let weekly = gateway.get_weekly(52.52, 13.405, "metric").await.unwrap();
        assert_eq!(weekly.entries.len(), 2);
        assert_eq!(weekly.entries[0].temperature_max, 77.0);

        let err = gateway.get_hourly(52.52, 13.405).await.unwrap_err();
        assert!(matches!(
            err.cause(),
            UpstreamFailure::Fetch(FetchError::Status { status: 500, .. })
        ));
    }
}
