//! Configuration loader for push-relay
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "RELAY_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "RELAY_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "RELAY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `RELAY_*` environment variables (highest priority)
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration directory path
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    /// Current application environment
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// This reads environment variables to determine:
    /// - Configuration directory (`RELAY_CONFIG_DIR`)
    /// - Specific configuration file (`RELAY_CONFIG_FILE`)
    /// - Application environment (`RELAY_APP_ENV`)
    ///
    /// # Errors
    ///
    /// Returns an error if both `RELAY_CONFIG_DIR` and `RELAY_CONFIG_FILE` are set,
    /// as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "RELAY_CONFIG_DIR and RELAY_CONFIG_FILE cannot both be set. \
                 Use RELAY_CONFIG_DIR for layered configuration or \
                 RELAY_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Loader for layered configuration rooted at `config_dir`
    pub fn from_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            config_file: None,
            environment: AppEnvironment::from_env(),
        }
    }

    /// Loader for a single configuration file (layering is skipped)
    pub fn from_file(config_file: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(config_file.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Override the environment used to pick `{environment}.toml`
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Get the configuration directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default.toml` (or the single configured file) is not found
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            Self::add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // RELAY_SERVER__PORT -> server.port
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    /// Build layered configuration from multiple files
    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
    }

    /// Add environment variable source to the config builder
    ///
    /// Examples:
    /// - `RELAY_SERVER__PORT` -> `server.port`
    /// - `RELAY_FIREBASE__PROJECT_ID` -> `firebase.project_id`
    /// - `RELAY_CORS__ALLOWED_ORIGINS=https://a.example,https://b.example`
    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

/// Serializes tests that touch process-wide `RELAY_*` variables
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use super::ENV_LOCK as TEST_MUTEX;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    const DEFAULT_CONFIG: &str = r#"
[application]
name = "test-relay"
version = "1.0.0"

[server]
host = "127.0.0.1"
port = 3000
request_timeout = 30
keep_alive_timeout = 75

[logger]
level = "info"

[logger.console]
enabled = true
colored = true

[logger.file]
enabled = false

[firebase]
api_base_url = "https://fcm.googleapis.com/v1"
timeout = 10
"#;

    #[test]
    fn test_config_loader_new_default() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove("RELAY_CONFIG_DIR");
        env.remove("RELAY_CONFIG_FILE");
        env.remove("RELAY_APP_ENV");

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set("RELAY_CONFIG_DIR", "/custom/config");
        env.set("RELAY_CONFIG_FILE", "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("RELAY_CONFIG_DIR"));
                assert!(msg.contains("RELAY_CONFIG_FILE"));
            }
            other => panic!("Expected MutualExclusivityError, got {other:?}"),
        }
    }

    #[test]
    fn test_config_loader_environment_from_env() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove("RELAY_CONFIG_DIR");
        env.remove("RELAY_CONFIG_FILE");
        env.set("RELAY_APP_ENV", "prod");

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.environment(), AppEnvironment::Production);
    }

    #[test]
    fn test_load_missing_default_toml() {
        let temp_dir = setup_config_dir(&[]);

        match ConfigLoader::from_dir(temp_dir.path()).load() {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_default_toml_only() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_CONFIG)]);

        let settings = ConfigLoader::from_dir(temp_dir.path())
            .with_environment(AppEnvironment::Test)
            .load()
            .expect("Should load settings");

        assert_eq!(settings.application.name, "test-relay");
        assert_eq!(settings.server.port, 3000);
        assert!(!settings.firebase.dry_run);
        assert_eq!(settings.cors.allowed_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_load_full_precedence_chain() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();

        let staging_config = r#"
[application]
name = "staging-relay"

[server]
port = 3001

[firebase]
project_id = "staging-project"
"#;
        let local_config = r#"
[server]
port = 3002

[firebase]
dry_run = true
"#;
        let temp_dir = setup_config_dir(&[
            ("default.toml", DEFAULT_CONFIG),
            ("staging.toml", staging_config),
            ("local.toml", local_config),
        ]);

        env.set("RELAY_SERVER__PORT", "3003");
        env.set(
            "RELAY_CORS__ALLOWED_ORIGINS",
            "https://shop.example.com,https://admin.example.com",
        );

        let settings = ConfigLoader::from_dir(temp_dir.path())
            .with_environment(AppEnvironment::Staging)
            .load()
            .expect("Should load settings");

        assert_eq!(settings.server.port, 3003);
        assert!(settings.firebase.dry_run);
        assert_eq!(settings.firebase.project_id.as_deref(), Some("staging-project"));
        assert_eq!(settings.application.name, "staging-relay");
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(
            settings.cors.allowed_origins,
            vec![
                "https://shop.example.com".to_string(),
                "https://admin.example.com".to_string()
            ]
        );
    }

    #[test]
    fn test_load_single_file_skips_layers() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[
            ("relay.toml", "[server]\nport = 8088\n"),
            ("local.toml", "[server]\nport = 9999\n"),
        ]);

        let settings = ConfigLoader::from_file(temp_dir.path().join("relay.toml"))
            .load()
            .expect("Should load settings");

        assert_eq!(settings.server.port, 8088);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[("default.toml", "[server]\nport = 0\n")]);

        let result = ConfigLoader::from_dir(temp_dir.path()).load();
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { field, .. }) if field == "server.port"
        ));
    }
}
