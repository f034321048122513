//! DeafTube API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p tube-api
//! ```
//!
//! Configuration is loaded from environment variables (and an optional `.env`).

use tube_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(e) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {e}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    // Pretty logs in development, JSON everywhere else
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        upload_dir = %config.storage.upload_dir,
        "Configuration loaded"
    );

    if let Err(e) = tube_api::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
