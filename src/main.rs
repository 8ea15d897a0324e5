//! # Chat Messaging
//!
//! Two-party chat messaging backend.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Event publisher
//! - HTTP server

use anyhow::Result;
use tracing::info;

use chat_messaging::config::Settings;
use chat_messaging::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    chat_messaging::telemetry::init_tracing();

    info!("Starting chat messaging backend...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        users = settings.users.len(),
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
