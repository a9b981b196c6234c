//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use crate::config::error::ConfigError;
use crate::config::settings::{
    CorsConfig, FileSettings, FirebaseConfig, LoggerSettings, ServerConfig, Settings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    /// - Keep-alive timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.keep_alive_timeout == 0 {
            return Err(ConfigError::validation(
                "server.keep_alive_timeout",
                "Keep-alive timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl FirebaseConfig {
    /// Validate Firebase configuration
    ///
    /// Presence of a credential is checked when the provider is built, since
    /// it may also come from `FIREBASE_SERVICE_ACCOUNT_KEY`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_url(&self.api_base_url) {
            return Err(ConfigError::ValidationError {
                field: "firebase.api_base_url".to_string(),
                message: format!(
                    "Invalid API base URL '{}'. Expected an http:// or https:// URL.",
                    self.api_base_url
                ),
            });
        }

        if self.timeout == 0 {
            return Err(ConfigError::validation(
                "firebase.timeout",
                "Firebase timeout must be greater than 0 seconds.",
            ));
        }

        if let Some(project_id) = &self.project_id
            && project_id.trim().is_empty()
        {
            return Err(ConfigError::validation(
                "firebase.project_id",
                "Project id must not be empty when set.",
            ));
        }

        if let Some(path) = &self.service_account_file
            && path.trim().is_empty()
        {
            return Err(ConfigError::validation(
                "firebase.service_account_file",
                "Service account file path must not be empty when set.",
            ));
        }

        Ok(())
    }
}

impl CorsConfig {
    /// Validate CORS configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_origins.is_empty() {
            return Err(ConfigError::validation(
                "cors.allowed_origins",
                "At least one allowed origin is required. Use \"*\" to allow any origin.",
            ));
        }

        if let Some(origin) = self
            .allowed_origins
            .iter()
            .find(|o| o.as_str() != "*" && !is_http_url(o))
        {
            return Err(ConfigError::ValidationError {
                field: "cors.allowed_origins".to_string(),
                message: format!(
                    "Invalid origin '{}'. Origins must be \"*\" or start with http:// or https://",
                    origin
                ),
            });
        }

        Ok(())
    }
}

impl FileSettings {
    /// Validate file settings
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        if self.max_size == 0 {
            return Err(ConfigError::validation(
                "logger.file.max_size",
                "Max file size must be greater than 0 bytes.",
            ));
        }

        if self.max_files == 0 {
            return Err(ConfigError::validation(
                "logger.file.max_files",
                "At least one rotated file must be kept.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.logger.validate()?;
        self.firebase.validate()?;
        self.cors.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::ConsoleSettings;

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    // ========================================================================
    // ServerConfig validation tests
    // ========================================================================

    #[test]
    fn test_server_config_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_server_config_invalid_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "server.port");
    }

    #[test]
    fn test_server_config_invalid_timeouts() {
        let config = ServerConfig {
            request_timeout: 0,
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "server.request_timeout"
        );

        let config = ServerConfig {
            keep_alive_timeout: 0,
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "server.keep_alive_timeout"
        );
    }

    // ========================================================================
    // FirebaseConfig validation tests
    // ========================================================================

    #[test]
    fn test_firebase_config_valid() {
        assert!(FirebaseConfig::default().validate().is_ok());
    }

    #[test]
    fn test_firebase_config_rejects_non_http_base_url() {
        let config = FirebaseConfig {
            api_base_url: "fcm.googleapis.com/v1".to_string(),
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "firebase.api_base_url"
        );
    }

    #[test]
    fn test_firebase_config_rejects_blank_project_id() {
        let config = FirebaseConfig {
            project_id: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "firebase.project_id"
        );
    }

    #[test]
    fn test_firebase_config_rejects_zero_timeout() {
        let config = FirebaseConfig {
            timeout: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "firebase.timeout");
    }

    // ========================================================================
    // CorsConfig validation tests
    // ========================================================================

    #[test]
    fn test_cors_config_valid_origins() {
        let config = CorsConfig {
            allowed_origins: vec![
                "https://shop.example.com".to_string(),
                "http://localhost:5173".to_string(),
            ],
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cors_config_rejects_empty_and_malformed() {
        let empty = CorsConfig {
            allowed_origins: vec![],
        };
        assert_eq!(field_of(empty.validate().unwrap_err()), "cors.allowed_origins");

        let malformed = CorsConfig {
            allowed_origins: vec!["shop.example.com".to_string()],
        };
        assert_eq!(
            field_of(malformed.validate().unwrap_err()),
            "cors.allowed_origins"
        );
    }

    // ========================================================================
    // LoggerSettings validation tests
    // ========================================================================

    #[test]
    fn test_logger_settings_valid_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO", "Debug"] {
            let settings = LoggerSettings {
                level: level.to_string(),
                ..Default::default()
            };
            assert!(settings.validate().is_ok(), "Level should be valid: {}", level);
        }
    }

    #[test]
    fn test_logger_settings_invalid_level() {
        let settings = LoggerSettings {
            level: "invalid".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger.level");
    }

    #[test]
    fn test_logger_settings_requires_an_output() {
        let settings = LoggerSettings {
            console: ConsoleSettings {
                enabled: false,
                colored: false,
            },
            ..Default::default()
        };
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger");
    }

    #[test]
    fn test_logger_settings_file_enabled_empty_path() {
        let settings = LoggerSettings {
            file: FileSettings {
                enabled: true,
                path: "".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger.file.path");
    }

    #[test]
    fn test_logger_settings_invalid_format() {
        let settings = LoggerSettings {
            file: FileSettings {
                format: "invalid".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger.file.format");
    }

    // ========================================================================
    // Settings validation tests
    // ========================================================================

    #[test]
    fn test_settings_default_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_settings_reports_first_invalid_section() {
        let settings = Settings {
            server: ServerConfig {
                port: 0,
                ..Default::default()
            },
            cors: CorsConfig {
                allowed_origins: vec![],
            },
            ..Default::default()
        };
        assert_eq!(field_of(settings.validate().unwrap_err()), "server.port");
    }
}
