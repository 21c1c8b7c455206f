//! chatterd - a line-oriented multi-user chat server.

use chatterd::config::Config;
use chatterd::network::Gateway;
use chatterd::state::Hub;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).map_err(|e| {
            error!(path = %config_path, error = %e, "failed to load config");
            e
        })?
    } else {
        info!(path = %config_path, "config file not found, using defaults");
        Config::default()
    };

    info!(
        server = %config.server.name,
        addr = %config.listen.address,
        max_clients = config.limits.max_clients,
        "starting chatterd"
    );

    let hub = Arc::new(Hub::new(&config));

    // An interrupt drives the orderly shutdown path: notify the
    // connected clients, then signal every task to finish.
    {
        let hub = Arc::clone(&hub);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received");
                hub.shutdown().await;
            }
        });
    }

    let gateway = Gateway::bind(config.listen.address, Arc::clone(&hub)).await?;
    gateway.run().await?;

    info!("server stopped");
    Ok(())
}
