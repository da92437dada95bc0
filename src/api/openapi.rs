use utoipa::OpenApi;

use crate::api::handlers::HealthResponse;
use crate::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Defect Tracker",
        version = "0.1.0",
        description = "Defect tracking service. Every failed operation answers with an ErrorResponse body: a human-readable message and a numeric status code.",
        contact(
            name = "Defect Tracker API",
        )
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::health_live,
        crate::api::handlers::echo_error,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "errors", description = "Error response contract"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_schema_registered() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schema = &doc["components"]["schemas"]["ErrorResponse"];

        assert_eq!(schema["properties"]["message"]["type"], "string");
        assert_eq!(schema["properties"]["status"]["type"], "integer");

        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 2);

        let mut required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        required.sort_unstable();
        assert_eq!(required, vec!["message", "status"]);
    }

    #[test]
    fn test_documented_paths() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert!(doc["paths"]["/health"].is_object());
        assert!(doc["paths"]["/errors/echo"]["post"].is_object());
    }
}
