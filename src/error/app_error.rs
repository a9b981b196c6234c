use axum::extract::rejection::JsonRejection;
use thiserror::Error;

use crate::config::error::ConfigError;
use crate::services::notifications::ProviderError;

/// Application-wide error type that represents all possible errors in the relay.
///
/// Handlers return `AppResult<T>`; the conversion to an HTTP response lives in
/// `api::middleware::error_handler`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Request used an HTTP method the endpoint does not serve
    #[error("Method not allowed: {message}")]
    MethodNotAllowed { message: String },

    /// The push provider rejected or failed the send
    #[error("Push provider '{provider}' failed")]
    Provider {
        provider: String,
        #[source]
        source: ProviderError,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Message intended for the `error` field of the response body.
    ///
    /// Provider failures surface the provider's own message verbatim; internal
    /// failures are sanitized.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation { reason, .. } => reason.clone(),
            AppError::BadRequest { message } => message.clone(),
            AppError::MethodNotAllowed { message } => message.clone(),
            AppError::Provider { source, .. } => source.message(),
            AppError::Configuration { key, .. } => format!("Configuration error: {}", key),
            AppError::Internal { .. } => "An internal error occurred".to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            ConfigError::FileNotFound(path) => path.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::new(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    /// Collapses validator output into a single validation failure.
    ///
    /// Struct-level (schema) errors are reported under the `request` field.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let first = fields.into_iter().find_map(|(field, errs)| {
            errs.first().map(|err| {
                let reason = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                let field = if field == "__all__" {
                    "request".to_string()
                } else {
                    field.to_string()
                };
                (field, reason)
            })
        });

        match first {
            Some((field, reason)) => AppError::Validation { field, reason },
            None => AppError::Validation {
                field: "request".to_string(),
                reason: "Invalid request".to_string(),
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::JsonDataError(_) => "Invalid JSON format".to_string(),
            JsonRejection::JsonSyntaxError(_) => "JSON syntax error".to_string(),
            JsonRejection::MissingJsonContentType(_) => {
                "Missing or invalid Content-Type header, expected application/json".to_string()
            }
            JsonRejection::BytesRejection(_) => "Request body could not be read".to_string(),
            _ => "Failed to parse JSON request".to_string(),
        };
        tracing::debug!(rejection = %rejection.body_text(), "Rejected request body");
        AppError::BadRequest { message }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
