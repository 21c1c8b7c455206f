//! Integration test common infrastructure.
//!
//! Provides utilities for spawning in-process test servers and creating
//! line-oriented test clients.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use server::TestServer;

use anyhow::Result;

/// Connect a client and complete the usual handshake: consume the
/// greeting, pick a display name, and consume the rename notice.
#[allow(dead_code)]
pub async fn named_client(server: &TestServer, name: &str) -> Result<TestClient> {
    let mut client = TestClient::connect(server.address()).await?;
    client.expect_containing("Welcome").await?;
    client.send_line(&format!("/nick {name}")).await?;
    client
        .expect_containing(&format!("renamed to {name}."))
        .await?;
    Ok(client)
}
