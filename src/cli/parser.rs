//! CLI argument parsing with clap

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// HTTP relay for push notifications
#[derive(Parser, Debug)]
#[command(name = "push-relay")]
#[command(about = "Relays push notification requests to Firebase Cloud Messaging")]
#[command(long_about = "
push-relay accepts JSON notification requests over HTTP and forwards them to
Firebase Cloud Messaging, addressed to a topic or a single device token.

EXAMPLES:
    # Start the server with default configuration
    push-relay serve

    # Start server on custom host and port
    push-relay serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    push-relay --config /etc/push-relay/production.toml serve

    # Check configuration and credentials without starting the server
    push-relay serve --dry-run

    # Send one notification from the command line
    push-relay send --topic news --title 'Hello' --body 'World' --data kind=digest
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load a single TOML file instead of the layered `config/` directory.
    /// `RELAY_*` environment variables still apply on top.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `config/{environment}.toml` is layered over the defaults.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    ///
    /// Examples:
    ///   push-relay serve                            # Start with defaults
    ///   push-relay serve --host 0.0.0.0 --port 80   # Bind to all interfaces on port 80
    ///   push-relay serve --dry-run                  # Validate config and credentials
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over the configuration file and --verbose/--quiet.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration, resolve the credential and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Send a single notification and print the result as JSON
    Send(SendArgs),
}

/// Arguments of `push-relay send`
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("target").required(true).args(["topic", "token"])))]
pub struct SendArgs {
    /// Topic to publish to
    #[arg(long)]
    pub topic: Option<String>,

    /// Device registration token
    #[arg(long)]
    pub token: Option<String>,

    /// Notification title
    #[arg(long)]
    pub title: String,

    /// Notification body
    #[arg(long)]
    pub body: String,

    /// Image URL
    #[arg(long, value_name = "URL")]
    pub image: Option<String>,

    /// Data entry as key=value (repeatable)
    #[arg(short, long = "data", value_name = "KEY=VALUE", value_parser = super::validation::validate_data_pair)]
    pub data: Vec<(String, String)>,

    /// Ask FCM to validate the message without delivering it
    #[arg(long)]
    pub validate_only: bool,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Checks argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Commands::Send(args)) = &self.command
            && (args.title.trim().is_empty() || args.body.trim().is_empty())
        {
            return Err("--title and --body must not be blank".to_string());
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
