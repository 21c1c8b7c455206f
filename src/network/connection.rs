//! Connection - handles an individual client connection.
//!
//! Each Connection runs in its own task and drives the per-connection
//! lifecycle: register, greeting plus join announcement, then a unified
//! `select!` loop over framed line reads, the outbox drain, and the
//! shutdown signal. Whatever ends the loop (`/quit`, EOF, read or write
//! error, shutdown), the same fixed teardown runs.

use crate::handlers::{Context, HandlerError, Registry};
use crate::state::Hub;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, info, instrument, warn};

/// Capacity of the per-connection outgoing queue. A peer that stops
/// reading stalls broadcasts into its own queue only.
const OUTBOX_CAPACITY: usize = 64;

/// Maximum accepted line length in bytes.
const MAX_LINE_LENGTH: usize = 512;

/// A client connection handler.
pub struct Connection {
    stream: TcpStream,
    addr: SocketAddr,
    hub: Arc<Hub>,
    registry: Arc<Registry>,
}

impl Connection {
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        hub: Arc<Hub>,
        registry: Arc<Registry>,
    ) -> Self {
        Self {
            stream,
            addr,
            hub,
            registry,
        }
    }

    /// Run the connection lifecycle to completion.
    #[instrument(skip(self), fields(addr = %self.addr), name = "connection")]
    pub async fn run(self) -> anyhow::Result<()> {
        let framed = Framed::new(
            self.stream,
            LinesCodec::new_with_max_length(MAX_LINE_LENGTH),
        );
        let (mut writer, mut reader) = framed.split();

        let (outbox_tx, mut outbox_rx) = mpsc::channel::<String>(OUTBOX_CAPACITY);

        // Connecting -> Active, or reject at capacity and close without
        // further processing.
        let client = match self.hub.register(outbox_tx.clone()) {
            Ok(client) => client,
            Err(err) => {
                warn!(error = %err, "connection rejected");
                return Ok(());
            }
        };
        info!(id = %client.id, name = %client.name, "client registered");

        let greeting = format!(
            "Welcome to {}! You are known as {}. Type /help for the command list.",
            self.hub.server_name, client.name
        );
        if writer.send(greeting).await.is_ok() {
            self.hub
                .send_to_all(&format!("{} joined the chat.", client.name))
                .await;

            let mut shutdown = self.hub.subscribe_shutdown();
            let mut ctx = Context {
                id: client.id,
                hub: &self.hub,
                outbox: &outbox_tx,
            };

            loop {
                tokio::select! {
                    read = reader.next() => match read {
                        Some(Ok(line)) => {
                            debug!(raw = %line, "line received");
                            match self.registry.dispatch(&mut ctx, &line).await {
                                Ok(()) => {}
                                Err(HandlerError::Quit) => {
                                    info!(id = %client.id, "client quit");
                                    break;
                                }
                                Err(err) => {
                                    debug!(id = %client.id, error = %err, "dispatch failed");
                                    break;
                                }
                            }
                        }
                        Some(Err(err)) => {
                            warn!(id = %client.id, error = %err, "read error");
                            break;
                        }
                        None => {
                            info!(id = %client.id, "client closed the connection");
                            break;
                        }
                    },

                    Some(line) = outbox_rx.recv() => {
                        if let Err(err) = writer.send(line).await {
                            warn!(id = %client.id, error = %err, "write error");
                            break;
                        }
                    }

                    _ = shutdown.recv() => {
                        // Flush whatever the shutdown broadcast queued
                        // (including the shutdown notice itself).
                        while let Ok(line) = outbox_rx.try_recv() {
                            let _ = writer.send(line).await;
                        }
                        break;
                    }
                }
            }
        }

        // Closing -> Closed: the fixed, idempotent teardown.
        self.hub.disconnect(client.id).await;
        info!(id = %client.id, "connection closed");

        Ok(())
    }
}
