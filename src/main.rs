use anyhow::Context;
use catalog_rs::cli::{self, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let merger = cli::load_config(&cli)?;
    let log_handle = cli::init_logger_from_settings(merger.config())?;

    let settings = merger
        .merge_cli_args(&cli)
        .context("Configuration merge error")?;
    cli::apply_log_level(&log_handle, merger.config(), &settings)?;

    cli::execute_command(&cli, settings).await.inspect_err(|e| {
        tracing::error!(error = %format!("{e:#}"), "Command failed");
    })
}
