//! Configuration loading and management.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
///
/// Every field has a default, so an empty (or absent) file yields a
/// runnable server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server identity.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Registry capacity limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name used in the greeting (e.g., "chat.example.net").
    #[serde(default = "default_server_name")]
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to listen on.
    #[serde(default = "default_listen_address")]
    pub address: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_listen_address(),
        }
    }
}

/// Registry capacity limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of concurrent clients.
    #[serde(default = "default_max_clients")]
    pub max_clients: usize,
    /// Maximum number of open channels.
    #[serde(default = "default_max_channels")]
    pub max_channels: usize,
    /// Maximum number of members per channel.
    #[serde(default = "default_max_channel_members")]
    pub max_channel_members: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_clients: default_max_clients(),
            max_channels: default_max_channels(),
            max_channel_members: default_max_channel_members(),
        }
    }
}

fn default_server_name() -> String {
    "chatterd.local".to_string()
}

fn default_listen_address() -> SocketAddr {
    ([0, 0, 0, 0], 5000).into()
}

fn default_max_clients() -> usize {
    10
}

fn default_max_channels() -> usize {
    10
}

fn default_max_channel_members() -> usize {
    10
}
