//! Error handler for converting AppError to HTTP responses.
//!
//! Every failure leaves the service as `{"success": false, "error", "code"}`.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - Validation → 400 BAD_REQUEST
    /// - BadRequest → 400 BAD_REQUEST
    /// - MethodNotAllowed → 405 METHOD_NOT_ALLOWED
    /// - Provider → 500 INTERNAL_SERVER_ERROR
    /// - Configuration → 500 INTERNAL_SERVER_ERROR
    /// - Internal → 500 INTERNAL_SERVER_ERROR
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, source = ?std::error::Error::source(&self), "Request failed");
        }

        let body = ErrorResponse::new(error_to_code(&self), &self.public_message());
        (status, Json(body)).into_response()
    }
}

pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        AppError::Provider { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
        AppError::Provider { .. } => "PROVIDER_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Rewrites error responses produced outside the handlers (router fallback,
/// timeout layer) into the JSON error shape.
pub async fn json_error_fallback(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (parts, body) = response.into_parts();
    let original = axum::body::to_bytes(body, 64 * 1024)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();

    let message = if original.is_empty() {
        default_message(status).to_string()
    } else {
        original
    };
    let code = status
        .canonical_reason()
        .map(|r| r.to_uppercase().replace([' ', '-'], "_"))
        .unwrap_or_else(|| "UNKNOWN_ERROR".to_string());

    let mut rewritten = (status, Json(ErrorResponse::new(&code, &message))).into_response();
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rewritten.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rewritten
}

fn default_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "The requested resource was not found",
        StatusCode::METHOD_NOT_ALLOWED => "HTTP method not allowed for this endpoint",
        StatusCode::REQUEST_TIMEOUT => "Request timeout",
        StatusCode::PAYLOAD_TOO_LARGE => "Request payload too large",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported media type",
        s if s.is_server_error() => "An internal server error occurred",
        _ => "Bad request",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::ProviderError;
    use axum::{Router, body::Body, routing::get};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let error = AppError::Validation {
            field: "request".to_string(),
            reason: "Provide either topic or token, and title + body".to_string(),
        };
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"], "Provide either topic or token, and title + body");
    }

    #[tokio::test]
    async fn test_provider_error_keeps_provider_message() {
        let error = AppError::Provider {
            provider: "fcm".to_string(),
            source: ProviderError::Rejected {
                status: 429,
                message: "quota exceeded".to_string(),
            },
        };
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "PROVIDER_ERROR");
        assert_eq!(body["error"], "quota exceeded");
    }

    #[tokio::test]
    async fn test_internal_error_is_sanitized() {
        let error = AppError::from(anyhow::anyhow!("secret stack detail"));
        let body = body_json(error.into_response()).await;

        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"], "An internal error occurred");
    }

    #[test]
    fn test_method_not_allowed_mapping() {
        let error = AppError::MethodNotAllowed {
            message: "Only POST requests allowed".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(error_to_code(&error), "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_fallback_rewrites_plain_not_found() {
        let app = Router::new()
            .route("/ok", get(|| async { "fine" }))
            .layer(axum::middleware::from_fn(json_error_fallback));

        let response = app
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["error"], "The requested resource was not found");
    }

    #[tokio::test]
    async fn test_fallback_leaves_success_untouched() {
        let app = Router::new()
            .route("/ok", get(|| async { "fine" }))
            .layer(axum::middleware::from_fn(json_error_fallback));

        let response = app
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"fine");
    }
}
