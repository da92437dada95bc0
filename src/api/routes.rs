use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    echo_error, health, health_live, route_not_found, start_uptime_clock, AppState,
};
use super::middleware::{handle_panic, logging_middleware, method_not_allowed_body};
use super::openapi::ApiDoc;
use crate::metrics;

pub fn create_router(state: AppState) -> Router {
    start_uptime_clock();

    let routes = Router::new()
        // Health check
        .route("/health", get(health))
        .route("/health/live", get(health_live))
        // Error response conformance
        .route("/errors/echo", post(echo_error))
        // Metrics endpoint (Prometheus)
        .route("/metrics", get(metrics::metrics_handler))
        // OpenAPI documentation
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    with_middleware(routes, state)
}

/// Wrap routes in the fallback, error shaping and middleware stack shared by every endpoint
pub fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes
        .fallback(route_not_found)
        // Failures the router produces itself also carry an error response body
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::map_response(method_not_allowed_body))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        // Add middleware (order matters: compression -> logging -> metrics -> cors -> trace)
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics::middleware::track_metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state)
}
