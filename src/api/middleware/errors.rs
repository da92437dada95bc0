use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::any::Any;
use tracing::error;

use crate::errors::{ApiError, ErrorResponse};
use crate::metrics::HANDLER_PANICS_TOTAL;

/// Give the router's bodiless 405 responses an error response body
pub async fn method_not_allowed_body(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED
        || response.headers().contains_key(header::CONTENT_TYPE)
    {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rewritten = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}

/// Turn a handler panic into a 500 error response
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail: &str = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    error!(panic = %detail, "Handler panicked");
    HANDLER_PANICS_TOTAL.inc();

    ErrorResponse::internal_error("Internal server error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_handle_panic_str_payload() {
        let response = handle_panic(Box::new("index out of bounds"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Internal server error", "status": 500})
        );
    }

    #[tokio::test]
    async fn test_handle_panic_string_payload() {
        let response = handle_panic(Box::new(String::from("boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_method_not_allowed_gets_body() {
        let bare = axum::http::Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header(header::ALLOW, "GET,HEAD")
            .body(axum::body::Body::empty())
            .unwrap();

        let response = method_not_allowed_body(bare).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET,HEAD");
        assert_eq!(
            body_json(response).await,
            json!({"message": "Method not allowed", "status": 405})
        );
    }

    #[tokio::test]
    async fn test_existing_error_body_is_kept() {
        let original = ErrorResponse::new("Transition not allowed", 405).into_response();
        let response = method_not_allowed_body(original).await;
        assert_eq!(
            body_json(response).await,
            json!({"message": "Transition not allowed", "status": 405})
        );
    }
}
