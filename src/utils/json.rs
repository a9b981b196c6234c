use crate::error::{AppError, AppResult};
use axum::Json;
use axum::extract::{FromRequest, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;

/// JSON body extractor whose rejection is an `AppError`.
///
/// Decoding failures (syntax, wrong types, missing `Content-Type`) become
/// `400` responses in the service's error shape. Semantic validation is left
/// to the dispatcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        title: Option<String>,
    }

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = Request::builder().method(Method::POST).uri("/test");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_valid_json() {
        let result =
            JsonBody::<Payload>::from_request(request(Some("application/json"), r#"{"title":"Hi"}"#), &())
                .await;

        let JsonBody(payload) = result.unwrap();
        assert_eq!(payload.title.as_deref(), Some("Hi"));
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let result =
            JsonBody::<Payload>::from_request(request(Some("application/json"), "{not json"), &())
                .await;

        match result.unwrap_err() {
            AppError::BadRequest { message } => assert_eq!(message, "JSON syntax error"),
            other => panic!("Expected BadRequest error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wrong_type_is_bad_request() {
        let result =
            JsonBody::<Payload>::from_request(request(Some("application/json"), r#"{"title":5}"#), &())
                .await;

        match result.unwrap_err() {
            AppError::BadRequest { message } => assert_eq!(message, "Invalid JSON format"),
            other => panic!("Expected BadRequest error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let result = JsonBody::<Payload>::from_request(request(None, r#"{"title":"Hi"}"#), &()).await;

        match result.unwrap_err() {
            AppError::BadRequest { message } => assert!(message.contains("Content-Type")),
            other => panic!("Expected BadRequest error, got {:?}", other),
        }
    }
}
