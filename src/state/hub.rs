//! The Hub - central shared state and message fan-out.
//!
//! The Hub owns both registries, the per-connection outbox table, and
//! the shutdown signal. Broadcast methods snapshot their recipient set
//! first and deliver with no registry lock held, so a slow peer can
//! stall only its own bounded queue.

use crate::config::Config;
use crate::error::RegistryError;
use crate::state::{ChannelRegistry, Client, ClientId, ClientRegistry};
use dashmap::DashMap;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

/// Per-connection queue of rendered outgoing lines.
pub type Outbox = mpsc::Sender<String>;

/// Central shared state container.
pub struct Hub {
    /// All connected clients.
    pub clients: ClientRegistry,
    /// All open channels.
    pub channels: ChannelRegistry,
    /// Server name used in the greeting.
    pub server_name: String,
    /// Outboxes for message routing, keyed by client identity.
    senders: DashMap<ClientId, Outbox>,
    /// Orderly-shutdown signal for the gateway and every handler task.
    shutdown_tx: broadcast::Sender<()>,
}

impl Hub {
    pub fn new(config: &Config) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            clients: ClientRegistry::new(config.limits.max_clients),
            channels: ChannelRegistry::new(
                config.limits.max_channels,
                config.limits.max_channel_members,
            ),
            server_name: config.server.name.clone(),
            senders: DashMap::new(),
            shutdown_tx,
        }
    }

    /// Register a new connection: allocate an identity and attach its
    /// outbox for routing. On `CapacityExceeded` the caller must close
    /// the connection without further processing.
    pub fn register(&self, outbox: Outbox) -> Result<Client, RegistryError> {
        let client = self.clients.register()?;
        self.senders.insert(client.id, outbox);
        Ok(client)
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Deliver one line to one client. A failed delivery means the
    /// recipient is already tearing down; it is logged and skipped.
    pub async fn send_to_client(&self, id: ClientId, line: &str) {
        let sender = self.senders.get(&id).map(|entry| entry.value().clone());
        if let Some(sender) = sender {
            if sender.send(line.to_string()).await.is_err() {
                debug!(%id, "recipient outbox closed, line dropped");
            }
        }
    }

    /// Deliver one line to every connected client.
    pub async fn send_to_all(&self, line: &str) {
        let recipients: Vec<(ClientId, Outbox)> = self
            .senders
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        for (id, sender) in recipients {
            if sender.send(line.to_string()).await.is_err() {
                debug!(%id, "recipient outbox closed, line dropped");
            }
        }
    }

    /// Deliver one line to every member of a channel. Unknown channels
    /// are a no-op; membership is snapshotted before any delivery.
    pub async fn send_to_channel(&self, channel: &str, line: &str) {
        let Some(members) = self.channels.members_of(channel) else {
            return;
        };
        for id in members {
            self.send_to_client(id, line).await;
        }
    }

    /// Tear down one client: release the outbox, departure notice to
    /// the remaining clients, channel removals (cascading deletions),
    /// unregister.
    ///
    /// Idempotent; disconnect can race with a forced shutdown.
    pub async fn disconnect(&self, id: ClientId) {
        self.senders.remove(&id);
        let Some(client) = self.clients.get(id) else {
            return;
        };

        self.send_to_all(&format!("{} left the chat.", client.name))
            .await;

        for (channel, remaining) in self.channels.leave_all(id) {
            if remaining == 0 {
                debug!(%channel, "channel deleted with its last member");
            }
        }

        self.clients.unregister(id);
        info!(%id, name = %client.name, "client disconnected");
    }

    /// Orderly shutdown: broadcast the notice through the normal
    /// snapshot mechanism, then signal every task to finish.
    pub async fn shutdown(&self) {
        info!("shutting down, notifying clients");
        self.send_to_all("Server disconnected.").await;
        let _ = self.shutdown_tx.send(());
    }
}
