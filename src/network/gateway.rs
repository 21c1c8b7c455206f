//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds a socket and spawns a Connection task for each
//! incoming client until the shutdown signal fires. A connection task's
//! termination is driven solely by its own read loop and cleanup path;
//! closing one handler never affects the others.

use crate::handlers::Registry;
use crate::network::Connection;
use crate::state::Hub;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    hub: Arc<Hub>,
    registry: Arc<Registry>,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(addr: SocketAddr, hub: Arc<Hub>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "listener bound");
        Ok(Self {
            listener,
            hub,
            registry: Arc::new(Registry::new()),
        })
    }

    /// The address actually bound (resolves an ephemeral port).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until the shutdown signal fires.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        let mut shutdown = self.hub.subscribe_shutdown();

        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        info!(%addr, "connection accepted");
                        let hub = Arc::clone(&self.hub);
                        let registry = Arc::clone(&self.registry);
                        tokio::spawn(async move {
                            let connection = Connection::new(stream, addr, hub, registry);
                            if let Err(e) = connection.run().await {
                                error!(%addr, error = %e, "connection error");
                            }
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "failed to accept connection");
                    }
                },
                _ = shutdown.recv() => {
                    info!("shutdown signal received, no longer accepting");
                    break;
                }
            }
        }

        Ok(())
    }
}
