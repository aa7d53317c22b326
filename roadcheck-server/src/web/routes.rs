//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::warn;

use crate::closures::{QueryError, QueryTime};
use crate::weather::{WeatherError, WeatherGateway};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<G: WeatherGateway + 'static>(state: AppState<G>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cameras", get(find_cameras::<G>))
        .route("/cameras/check", get(check_camera::<G>))
        .route("/closures/check", get(check_closure::<G>))
        .route("/rain/on", get(rain_on::<G>))
        .route("/rain/before", get(rain_before::<G>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the speed cameras on a street.
async fn find_cameras<G: WeatherGateway>(
    State(state): State<AppState<G>>,
    Query(req): Query<CameraSearchRequest>,
) -> Json<CameraListResponse> {
    let cameras = state
        .facts
        .find_cameras(&req.street)
        .into_iter()
        .map(CameraResult::from)
        .collect();

    Json(CameraListResponse { cameras })
}

/// Whether a street had a speed camera by a given year.
async fn check_camera<G: WeatherGateway>(
    State(state): State<AppState<G>>,
    Query(req): Query<CameraCheckRequest>,
) -> Json<CameraCheckResponse> {
    let cameras = state.facts.cameras();

    Json(CameraCheckResponse {
        had_camera: cameras.had_camera(&req.street, req.year),
        earliest_installation: cameras.earliest_installation(&req.street),
    })
}

/// Whether a street was fully closed at a given time.
async fn check_closure<G: WeatherGateway>(
    State(state): State<AppState<G>>,
    Query(req): Query<ClosureCheckRequest>,
) -> Result<Json<ClosureCheckResponse>, AppError> {
    let at = QueryTime::from(req.at.as_str()).resolve()?;
    let closures: Vec<ClosureResult> = state
        .facts
        .closures()
        .closures_at(&req.locality, &req.street, at)?
        .into_iter()
        .map(ClosureResult::from)
        .collect();

    Ok(Json(ClosureCheckResponse {
        had_closure: !closures.is_empty(),
        at,
        closures,
    }))
}

/// Whether it rained on a given day.
async fn rain_on<G: WeatherGateway>(
    State(state): State<AppState<G>>,
    Query(req): Query<RainOnRequest>,
) -> Result<Json<RainResponse>, AppError> {
    let rained = state.facts.rained_on(req.date).await?;
    Ok(Json(RainResponse { rained }))
}

/// Whether it rained in the hours leading up to a given time.
async fn rain_before<G: WeatherGateway>(
    State(state): State<AppState<G>>,
    Query(req): Query<RainBeforeRequest>,
) -> Result<Json<RainResponse>, AppError> {
    let rained = state
        .facts
        .rained_before(req.date, req.hour, req.lookback_hours)
        .await?;
    Ok(Json(RainResponse { rained }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The request itself is unusable
    BadRequest { message: String },

    /// The weather service failed
    BadGateway { message: String },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::InvalidQuery(message) => AppError::BadRequest { message },
            _ => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
