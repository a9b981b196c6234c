//! Push provider abstraction.
//!
//! The dispatcher talks to a `PushProvider` trait object; FCM is the
//! production implementation and tests substitute a recording stub.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::OutboundMessage;

/// Errors raised by push providers
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Credentials could not be used to obtain an access token
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The provider could not be reached
    #[error("Connection failed: {message}")]
    Connection { message: String },

    /// The provider answered with an error status
    #[error("Provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The provider answered with something we could not parse
    #[error("Invalid provider response: {message}")]
    InvalidResponse { message: String },

    /// Provider configuration is unusable
    #[error("Provider configuration invalid: {message}")]
    Configuration { message: String },
}

impl ProviderError {
    /// Bare message from the provider, without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            ProviderError::Authentication { message }
            | ProviderError::Connection { message }
            | ProviderError::Rejected { message, .. }
            | ProviderError::InvalidResponse { message }
            | ProviderError::Configuration { message } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ProviderError::InvalidResponse {
                message: error.to_string(),
            }
        } else {
            ProviderError::Connection {
                message: error.to_string(),
            }
        }
    }
}

/// Trait for push notification providers
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All providers must be Send + Sync for use in async contexts.
///
/// # Example Implementation
/// ```ignore
/// use async_trait::async_trait;
///
/// pub struct LogOnlyProvider;
///
/// #[async_trait]
/// impl PushProvider for LogOnlyProvider {
///     async fn send(&self, message: &OutboundMessage) -> Result<String, ProviderError> {
///         tracing::info!(target_kind = message.target.kind(), "would send");
///         Ok("log-only".to_string())
///     }
///
///     fn name(&self) -> &'static str {
///         "log"
///     }
/// }
/// ```
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Sends one message and returns the provider's receipt (message id)
    async fn send(&self, message: &OutboundMessage) -> Result<String, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Validates provider configuration (optional, default no-op)
    ///
    /// Used by the health endpoint and `serve --dry-run`.
    async fn validate_config(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_strips_variant_prefix() {
        let error = ProviderError::Rejected {
            status: 404,
            message: "Requested entity was not found.".to_string(),
        };
        assert_eq!(error.message(), "Requested entity was not found.");
        assert_eq!(
            error.to_string(),
            "Provider rejected the message (404): Requested entity was not found."
        );
    }

    #[test]
    fn test_connection_message() {
        let error = ProviderError::Connection {
            message: "timed out".to_string(),
        };
        assert_eq!(error.message(), "timed out");
    }
}
