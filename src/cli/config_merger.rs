//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments override values loaded from configuration files.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Merges CLI overrides into file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
    loader: Option<ConfigLoader>,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self {
            base_config,
            loader: None,
        }
    }

    /// Load the base configuration the way the CLI asks for it.
    ///
    /// `--config FILE` loads a single file; otherwise the layered loader reads
    /// `RELAY_CONFIG_DIR`/`RELAY_CONFIG_FILE`. `--env` picks the environment
    /// overlay in both cases.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = match &cli.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        let base_config = loader.load()?;
        Ok(Self {
            base_config,
            loader: Some(loader),
        })
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// CLI arguments have the highest priority; the result is validated again.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        self.apply_global_overrides(&mut config, cli);

        if let Some(ref command) = cli.command {
            self.apply_command_overrides(&mut config, command, cli);
        }

        config.validate()?;

        Ok(config)
    }

    fn apply_global_overrides(&self, config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(&self, config: &mut Settings, command: &Commands, cli: &Cli) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
                dry_run: _,
            } => {
                if let Some(host_addr) = host {
                    config.server.host = host_addr.clone();
                }

                if let Some(port_num) = port {
                    config.server.port = *port_num;
                }

                // Command-specific level wins over --verbose/--quiet
                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }
            }
            Commands::Send(args) => {
                if args.validate_only {
                    config.firebase.dry_run = true;
                }
                // Keep stdout for the JSON result unless asked otherwise
                if !cli.verbose && !cli.quiet {
                    config.logger.level = "warn".to_string();
                }
            }
        }
    }

    /// Get the current configuration (useful for inspection)
    pub fn config(&self) -> &Settings {
        &self.base_config
    }

    /// The loader the base configuration came from, if any
    pub fn into_loader(self) -> Option<ConfigLoader> {
        self.loader
    }
}
