//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::server::{LogReload, Server};
use crate::services::build_provider;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run(self, log_reload: Option<LogReload>) -> anyhow::Result<()> {
        let mut server = Server::new(self.config);
        if let Some(reload) = log_reload {
            server = server.with_log_reload(reload);
        }
        server.run().await
    }

    /// Validate configuration and the push credential without starting the server
    pub async fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Logger configuration is valid");

        let provider = build_provider(&self.config.firebase)?;
        provider
            .validate_config()
            .await
            .map_err(|source| AppError::Provider {
                provider: provider.name().to_string(),
                source,
            })?;
        println!("✓ Push credential resolved ({})", provider.name());

        if self.config.firebase.dry_run {
            println!("✓ FCM dry run is enabled; messages will be validated, not delivered");
        }

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_handler_new() {
        let config = Settings::default();
        let handler = ServeCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_dry_run_rejects_invalid_config() {
        let mut config = Settings::default();
        config.server.port = 0;
        let handler = ServeCommandHandler::new(config);

        let result = handler.validate_only().await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_dry_run_rejects_unreadable_credential() {
        let mut config = Settings::default();
        config.firebase.service_account_key = Some("{not json".to_string());
        let handler = ServeCommandHandler::new(config);

        let result = handler.validate_only().await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_dry_run_accepts_valid_credential() {
        let key = serde_json::json!({
            "type": "service_account",
            "project_id": "demo-project",
            "private_key_id": "kid-1",
            "private_key": include_str!("../../services/notifications/testdata/test_key.pem"),
            "client_email": "relay@demo-project.iam.gserviceaccount.com",
            "token_uri": "https://oauth2.googleapis.com/token"
        });
        let mut config = Settings::default();
        config.firebase.service_account_key = Some(key.to_string());
        let handler = ServeCommandHandler::new(config);

        assert!(handler.validate_only().await.is_ok());
    }
}
