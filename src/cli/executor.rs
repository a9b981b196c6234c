//! Command executor for dispatching CLI commands

use super::handlers::{SendCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::api::dto::ErrorResponse;
use crate::api::middleware::error_to_code;
use crate::config::{ConfigLoader, settings::Settings};
use crate::error::{AppError, AppResult};
use crate::logger::LogLevelHandle;
use crate::server::LogReload;

/// Execute a CLI command with the given settings
///
/// `serve` (also the default) runs until shutdown; `serve --dry-run` and
/// `send` return once done.
///
/// # Errors
/// Returns errors from argument validation or the command handlers
pub async fn execute_command(
    cli: &Cli,
    settings: Settings,
    loader: Option<ConfigLoader>,
    log_handle: LogLevelHandle,
) -> anyhow::Result<()> {
    validate_command_args(cli)?;

    match &cli.command {
        Some(Commands::Serve { dry_run: true, .. }) => {
            ServeCommandHandler::new(settings).validate_only().await?;
            Ok(())
        }
        Some(Commands::Serve { .. }) | None => {
            let log_reload = loader.map(|loader| LogReload {
                loader,
                handle: log_handle,
            });
            ServeCommandHandler::new(settings).run(log_reload).await
        }
        Some(Commands::Send(args)) => {
            match SendCommandHandler::new(settings).execute(args).await {
                Ok(response) => {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                    Ok(())
                }
                Err(error) => {
                    let body = ErrorResponse::new(error_to_code(&error), &error.public_message());
                    println!("{}", serde_json::to_string_pretty(&body)?);
                    Err(error.into())
                }
            }
        }
    }
}

/// Validate command arguments before execution
fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    if let Some(Commands::Serve {
        host: Some(host),
        port: Some(port),
        ..
    }) = &cli.command
        && *port < 1024
        && host == "0.0.0.0"
    {
        eprintln!("Warning: Binding to 0.0.0.0 on port {} requires root privileges", port);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_validate_serve_args() {
        let cli = Cli::try_parse_from(["push-relay", "serve", "--host", "0.0.0.0", "--port", "80"])
            .unwrap();
        assert!(validate_command_args(&cli).is_ok());
    }

    #[test]
    fn test_validate_blank_send_body() {
        let cli = Cli::try_parse_from([
            "push-relay", "send", "--topic", "news", "--title", "Hi", "--body", "",
        ])
        .unwrap();

        match validate_command_args(&cli) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "cli_arguments"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
