//! Desk Action - Main entry point.

use anyhow::Result;
use desk_action::ActionService;
use desk_common::config::Config;
use desk_common::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration; missing required values abort startup.
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    tracing::info!("Desk Action v{}", env!("CARGO_PKG_VERSION"));

    // Start the action service
    let service = ActionService::new(config);
    service.start().await
}
