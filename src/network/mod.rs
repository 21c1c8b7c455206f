//! Network layer: listener and per-connection handlers.

mod connection;
mod gateway;

pub use connection::Connection;
pub use gateway::Gateway;
