//! Test server management.
//!
//! Runs chatterd in-process on an ephemeral port.

use chatterd::config::Config;
use chatterd::network::Gateway;
use chatterd::state::Hub;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A test server instance.
pub struct TestServer {
    addr: SocketAddr,
    hub: Arc<Hub>,
    gateway: JoinHandle<()>,
}

impl TestServer {
    /// Spawn a server with default limits.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(Config::default()).await
    }

    /// Spawn a server with the given configuration (the listen address
    /// is always replaced with an ephemeral localhost port).
    pub async fn spawn_with(mut config: Config) -> anyhow::Result<Self> {
        config.listen.address = "127.0.0.1:0".parse()?;
        let hub = Arc::new(Hub::new(&config));

        let gateway = Gateway::bind(config.listen.address, Arc::clone(&hub)).await?;
        let addr = gateway.local_addr()?;
        let gateway = tokio::spawn(async move {
            let _ = gateway.run().await;
        });

        Ok(Self { addr, hub, gateway })
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    /// Direct access to the shared state, for registry-level asserts.
    #[allow(dead_code)]
    pub fn hub(&self) -> &Arc<Hub> {
        &self.hub
    }

    /// Drive the orderly shutdown path.
    #[allow(dead_code)]
    pub async fn shutdown(&self) {
        self.hub.shutdown().await;
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.gateway.abort();
    }
}
