//! Registry error types.
//!
//! Registry operations never panic and never leave partial state behind;
//! a failed insert or rename is a clean rejection. Each variant maps to a
//! client-visible reply via [`RegistryError::to_reply`].

use thiserror::Error;

/// Errors returned by the client and channel registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The client registry is at capacity; the connection must be closed.
    #[error("client registry is full")]
    CapacityExceeded,

    /// The requested display name is held by another client.
    #[error("name already taken: {0}")]
    NameTaken(String),

    /// No client or channel with that name exists.
    #[error("not found: {0}")]
    NotFound(String),

    /// The channel is at its member capacity.
    #[error("channel is full: {0}")]
    ChannelFull(String),

    /// The channel registry is at capacity.
    #[error("too many channels")]
    TooManyChannels,

    /// The client is already a member of the channel.
    #[error("already a member of {0}")]
    AlreadyMember(String),

    /// The name is a query keyword and cannot be a channel.
    #[error("reserved name: {0}")]
    NameReserved(String),
}

impl RegistryError {
    /// Render the client-visible reply text for this error.
    pub fn to_reply(&self) -> String {
        match self {
            Self::CapacityExceeded => "The server is full.".to_string(),
            Self::NameTaken(name) => format!("The name {name} is already taken."),
            Self::NotFound(name) => format!("No such name: {name}."),
            Self::ChannelFull(channel) => format!("The channel {channel} is full."),
            Self::TooManyChannels => "Too many channels are open.".to_string(),
            Self::AlreadyMember(channel) => format!("You are already a member of {channel}."),
            Self::NameReserved(name) => format!("The name {name} is reserved."),
        }
    }
}
