//! chatterd - a line-oriented multi-user chat server.
//!
//! A TCP server that assigns each connection an identity, relays
//! newline-delimited messages to everyone, to a named peer, or to the
//! members of a named channel, and keeps the shared client/channel
//! registries consistent under concurrent mutation.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;
