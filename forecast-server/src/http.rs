use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use forecast_core::{Config, ForecastGateway, LocationIndex};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::{ErrorBody, HealthBody, HourlyForecastBody, LocationsBody, WeeklyForecastBody};

#[derive(Debug, Clone)]
pub struct AppState {
    pub locations: Arc<LocationIndex>,
    pub gateway: ForecastGateway,
}

impl AppState {
    /// Load the dataset and wire the gateway. Fails if the dataset can't be loaded.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let locations = LocationIndex::from_path(&config.locations.path).with_context(|| {
            format!(
                "Location search is unavailable without the dataset at {}",
                config.locations.path.display()
            )
        })?;

        Ok(Self {
            locations: Arc::new(locations),
            gateway: ForecastGateway::from_config(config)?,
        })
    }
}

struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    const fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }
}

/// Unwrap query parameters, answering a malformed query string (e.g. a
/// repeated key) with the route's own 400 message.
fn query_params<T>(
    params: Result<Query<T>, QueryRejection>,
    message: &'static str,
) -> Result<T, ApiError> {
    params.map(|Query(params)| params).map_err(|rejection| {
        tracing::debug!("Rejected query string: {rejection}");
        ApiError::new(StatusCode::BAD_REQUEST, message)
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.message.to_string() };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WeekParams {
    latitude: Option<String>,
    longitude: Option<String>,
    units: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HourlyParams {
    lat: Option<String>,
    lon: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/locations/search", get(search_locations))
        .route("/api/v1/forecast/week", get(weekly_forecast))
        .route("/api/v1/forecast/hourly", get(hourly_forecast))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn serve(listen: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind {listen}"))?;

    tracing::info!("Forecast server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutting down");
}

async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        locations: state.locations.len(),
    })
}

async fn search_locations(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<LocationsBody>, ApiError> {
    const MISSING_QUERY: &str = "Missing required query parameter: 'query'";

    let query = query_params(params, MISSING_QUERY)?
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or(ApiError::new(StatusCode::BAD_REQUEST, MISSING_QUERY))?;

    let locations = state.locations.search(&query);
    if locations.is_empty() {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "No locations found matching the search query.",
        ));
    }

    Ok(Json(LocationsBody::from(locations.as_slice())))
}

async fn weekly_forecast(
    State(state): State<AppState>,
    params: Result<Query<WeekParams>, QueryRejection>,
) -> Result<Json<WeeklyForecastBody>, ApiError> {
    const INVALID_COORDINATES: &str = "Missing or invalid coordinates.";

    let params = query_params(params, INVALID_COORDINATES)?;
    let (Some(latitude), Some(longitude)) = (
        parse_coordinate(params.latitude.as_deref()),
        parse_coordinate(params.longitude.as_deref()),
    ) else {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, INVALID_COORDINATES));
    };

    let units = params.units.as_deref().unwrap_or("metric");

    let forecast = state
        .gateway
        .get_weekly(latitude, longitude, units)
        .await
        .map_err(|_| {
            ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Weather service is currently unavailable.",
            )
        })?;

    Ok(Json(WeeklyForecastBody::from(&forecast)))
}

async fn hourly_forecast(
    State(state): State<AppState>,
    params: Result<Query<HourlyParams>, QueryRejection>,
) -> Result<Json<HourlyForecastBody>, ApiError> {
    const INVALID_PARAMETERS: &str = "Invalid or missing parameters";

    let params = query_params(params, INVALID_PARAMETERS)?;
    let (Some(latitude), Some(longitude)) = (
        parse_coordinate(params.lat.as_deref()),
        parse_coordinate(params.lon.as_deref()),
    ) else {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, INVALID_PARAMETERS));
    };

    let forecast = state
        .gateway
        .get_hourly(latitude, longitude)
        .await
        .map_err(|_| ApiError::new(StatusCode::BAD_GATEWAY, "Upstream weather provider error"))?;

    Ok(Json(HourlyForecastBody::from(&forecast)))
}

fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
