use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, Uri},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use utoipa::ToSchema;

use crate::errors::{ApiError, ErrorResponse};

const SERVICE_NAME: &str = "defect-tracker";

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

/// Start the uptime clock reported by the health endpoints
pub fn start_uptime_clock() {
    lazy_static::initialize(&START_TIME);
}

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub instance_id: String,
    pub max_body_bytes: usize,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// "healthy" or "alive"
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// Instance serving the request
    pub instance_id: String,
    /// Seconds since the router was built
    pub uptime_seconds: u64,
}

impl HealthResponse {
    fn new(status: &str, state: &AppStateInner) -> Self {
        Self {
            status: status.to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instance_id: state.instance_id.clone(),
            uptime_seconds: START_TIME.elapsed().as_secs(),
        }
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy", &state))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses(
        (status = 200, description = "Process is alive", body = HealthResponse)
    )
)]
pub async fn health_live(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::new("alive", &state))
}

/// Send an error response back exactly as it would be framed for a failure
#[utoipa::path(
    post,
    path = "/errors/echo",
    tag = "errors",
    request_body = ErrorResponse,
    responses(
        (status = 400, description = "Echoed record, or a malformed request body", body = ErrorResponse),
        (status = 404, description = "Echoed record", body = ErrorResponse),
        (status = 500, description = "Echoed record whose status is not a valid HTTP status", body = ErrorResponse)
    )
)]
pub async fn echo_error(
    payload: Result<Json<ErrorResponse>, JsonRejection>,
) -> Result<ErrorResponse, ApiError> {
    let Json(err) = payload?;
    debug!(error = %err, "Echoing error response");
    Ok(err)
}

/// Fallback for requests that match no route
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {} {}", method, uri.path()))
}
