use clap::Parser;
use push_relay::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (settings, loader) = load_and_merge_config(&cli)?;
    let log_handle = init_logger_from_settings(&settings)?;

    execute_command(&cli, settings, loader, log_handle).await
}
