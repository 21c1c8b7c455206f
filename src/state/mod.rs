//! Shared server state: registries and the Hub.

mod channels;
mod clients;
mod hub;

pub use channels::{ChannelRegistry, JoinOutcome};
pub use clients::{Client, ClientId, ClientRegistry};
pub use hub::{Hub, Outbox};
