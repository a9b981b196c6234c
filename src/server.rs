//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::sync::Arc;

use crate::api::routes::create_router;
use crate::config::{ConfigLoader, settings::Settings};
use crate::logger::LogLevelHandle;
use crate::services::{PushProvider, build_provider};
use crate::state::AppState;
use tokio::net::TcpListener;
use tokio::signal;

/// Re-applies `logger.level` from the configuration files on SIGHUP
pub struct LogReload {
    pub loader: ConfigLoader,
    pub handle: LogLevelHandle,
}

/// HTTP server manager
pub struct Server {
    settings: Settings,
    provider: Option<Arc<dyn PushProvider>>,
    log_reload: Option<LogReload>,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            provider: None,
            log_reload: None,
        }
    }

    /// Use this provider instead of building FCM from `settings.firebase`
    pub fn with_provider(mut self, provider: Arc<dyn PushProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_log_reload(mut self, reload: LogReload) -> Self {
        self.log_reload = Some(reload);
        self
    }

    /// Start the server and run until shutdown signal
    ///
    /// # Errors
    /// - Missing or unusable push credential
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            request_timeout = %self.settings.server.request_timeout,
            keep_alive_timeout = %self.settings.server.keep_alive_timeout,
            "Server configuration loaded"
        );

        tracing::info!(
            level = %self.settings.logger.level,
            console_enabled = %self.settings.logger.console.enabled,
            file_enabled = %self.settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        tracing::info!(
            api_base_url = %self.settings.firebase.api_base_url,
            dry_run = %self.settings.firebase.dry_run,
            timeout = %self.settings.firebase.timeout,
            allowed_origins = ?self.settings.cors.allowed_origins,
            "Push configuration loaded"
        );

        let provider = match self.provider {
            Some(provider) => provider,
            None => build_provider(&self.settings.firebase).map_err(|e| {
                tracing::error!(error = %e, "Push provider initialization failed");
                anyhow::anyhow!("Push provider initialization failed: {}", e)
            })?,
        };

        let state = AppState::new(provider);
        let router = create_router(state, &self.settings);
        tracing::info!("Router configured");

        if let Some(reload) = self.log_reload {
            spawn_log_reload(reload);
        }

        let address = listener.local_addr()?;
        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

#[cfg(unix)]
fn spawn_log_reload(reload: LogReload) {
    use signal::unix::{SignalKind, signal};

    tokio::spawn(async move {
        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(hangup) => hangup,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGHUP handler, log level reload disabled");
                return;
            }
        };

        while hangup.recv().await.is_some() {
            tracing::info!("Received SIGHUP, reloading log level");
            match reload.loader.load() {
                Ok(settings) => {
                    if let Err(e) = reload.handle.set_level(&settings.logger.level) {
                        tracing::warn!(error = %e, "Failed to apply reloaded log level");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Configuration reload failed"),
            }
        }
    });
}

#[cfg(not(unix))]
fn spawn_log_reload(_reload: LogReload) {
    tracing::debug!("Log level reload on SIGHUP is only available on unix");
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// A handler that cannot be installed never fires; the other one still does.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::testing::RecordingProvider;
    use serde_json::{Value, json};
    use std::time::Duration;

    #[tokio::test]
    async fn test_serves_notifications_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let provider = Arc::new(RecordingProvider::succeeding("projects/p/messages/9"));

        let server = Server::new(Settings::default()).with_provider(provider.clone());
        let task = tokio::spawn(server.serve(listener));

        let client = crate::external::build_http_client(Duration::from_secs(5)).unwrap();
        let response = client
            .post(format!("http://{address}/api/send"))
            .json(&json!({"token": "device-1", "title": "Hello", "body": "World"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["response"], "projects/p/messages/9");
        assert_eq!(body["token"], "device-1");
        assert_eq!(provider.call_count(), 1);

        task.abort();
    }

    #[tokio::test]
    async fn test_missing_credential_fails_startup() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut settings = Settings::default();
        settings.firebase.service_account_file = Some("/nonexistent/service-account.json".to_string());

        let result = Server::new(settings).serve(listener).await;
        assert!(result.is_err());
    }
}
