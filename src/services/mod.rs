//! Service layer.
//!
//! Services hold the business logic and are shared with handlers through the
//! axum state.

pub mod notifications;

use std::sync::Arc;
use std::time::Duration;

pub use notifications::{NotificationDispatcher, PushProvider};

use crate::config::{ConfigError, FirebaseConfig};
use crate::external::build_http_client;
use notifications::{FcmProvider, ServiceAccountKey};

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since the provider lives behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub dispatcher: NotificationDispatcher,
}

impl Services {
    pub fn new(provider: Arc<dyn PushProvider>) -> Self {
        Self {
            dispatcher: NotificationDispatcher::new(provider),
        }
    }
}

/// Resolves the service account and builds the FCM provider.
///
/// A missing or unusable credential is a startup error.
pub fn build_provider(config: &FirebaseConfig) -> Result<Arc<dyn PushProvider>, ConfigError> {
    let key = ServiceAccountKey::resolve(config)?;
    let http = build_http_client(Duration::from_secs(config.timeout))
        .map_err(|e| ConfigError::credential(format!("Failed to build HTTP client: {}", e)))?;
    let provider = FcmProvider::new(key, config, http)
        .map_err(|e| ConfigError::credential(e.to_string()))?;

    tracing::info!(
        provider = "fcm",
        project_id = provider.project_id(),
        dry_run = config.dry_run,
        "Push provider initialized"
    );
    Ok(Arc::new(provider))
}
