pub mod middleware;
pub mod registry;

use anyhow::Context;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use prometheus::{Encoder, TextEncoder};

use crate::errors::ApiError;

/// Handler for the /metrics endpoint
/// Returns metrics in Prometheus exposition format
pub async fn metrics_handler() -> Result<Response, ApiError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .context("Failed to encode metrics")?;
    let body = String::from_utf8(buffer).context("Metrics output was not UTF-8")?;

    Ok((
        StatusCode::OK,
        [("Content-Type", encoder.format_type())],
        body,
    )
        .into_response())
}

pub use registry::{
    ERROR_RESPONSES_TOTAL, HANDLER_PANICS_TOTAL, HTTP_REQUESTS_TOTAL,
    HTTP_REQUEST_DURATION_SECONDS,
};
