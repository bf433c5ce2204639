//! # Blogdesk
//!
//! Terminal client for a remote blog collection: list, read and publish.

use clap::Parser;
use tokio::io::BufReader;

mod cli;
mod config;
mod controller;
mod error;
mod session;
mod state;
mod telemetry;
mod view;

use cli::{Cli, Command};
use config::ClientConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    telemetry.json_logs |= args.json_logs;
    telemetry::init_telemetry(&telemetry);

    let config = ClientConfig::from_env().with_api_url(args.api_url);
    let state = AppState::new(&config).map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let mut ctrl = state.controller();

    let result = match args.command.unwrap_or(Command::Browse) {
        Command::Browse => {
            session::run_session(&mut ctrl, BufReader::new(tokio::io::stdin())).await
        }
        command => cli::run(command, &mut ctrl).await.map(|out| print!("{}", out)),
    };

    if let Err(err) = result {
        tracing::debug!(error = ?err, "Command failed");
        anyhow::bail!(err.user_message());
    }

    Ok(())
}
