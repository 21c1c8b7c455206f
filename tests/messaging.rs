//! Messaging and query commands: `/pm`, `/me`, `/tell` errors, `/who`,
//! `/howmany`, and the usage replies for malformed commands.

mod common;

use common::{named_client, TestServer};
use std::time::Duration;

#[tokio::test]
async fn pm_reaches_sender_and_target_only() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = named_client(&server, "alice").await?;
    let mut bob = named_client(&server, "bob").await?;
    let mut carol = named_client(&server, "carol").await?;

    alice.send_line("/pm bob secret").await?;
    assert_eq!(
        bob.expect_containing("sends to you").await?,
        "alice sends to you: secret"
    );
    assert_eq!(
        alice.expect_containing("You sent to").await?,
        "You sent to bob: secret"
    );
    carol.expect_silence(Duration::from_millis(300)).await?;
    Ok(())
}

#[tokio::test]
async fn pm_to_an_unknown_user_is_rejected() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = named_client(&server, "alice").await?;

    alice.send_line("/pm mallory psst").await?;
    assert_eq!(
        alice.recv_line().await?,
        "No user named mallory is connected."
    );
    Ok(())
}

#[tokio::test]
async fn pm_without_a_message_gets_the_usage_line() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = named_client(&server, "alice").await?;
    let mut bob = named_client(&server, "bob").await?;

    alice.send_line("/pm bob").await?;
    assert_eq!(
        alice.expect_containing("Usage:").await?,
        "Usage: /pm <name> <message>"
    );
    bob.expect_silence(Duration::from_millis(300)).await?;
    Ok(())
}

#[tokio::test]
async fn me_broadcasts_an_action_line() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = named_client(&server, "alice").await?;
    let mut bob = named_client(&server, "bob").await?;

    alice.send_line("/me waves at everyone").await?;
    assert_eq!(
        bob.expect_containing("waves").await?,
        "alice waves at everyone"
    );
    assert_eq!(
        alice.expect_containing("waves").await?,
        "alice waves at everyone"
    );
    Ok(())
}

#[tokio::test]
async fn tell_to_an_unknown_channel_is_rejected() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = named_client(&server, "alice").await?;

    alice.send_line("/tell lobby anyone here").await?;
    assert_eq!(alice.recv_line().await?, "No channel named lobby is open.");
    Ok(())
}

#[tokio::test]
async fn who_global_lists_connected_names() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = named_client(&server, "alice").await?;
    let _bob = named_client(&server, "bob").await?;

    alice.send_line("/who global").await?;
    // Snapshot order follows connection order.
    assert_eq!(alice.expect_containing("alice").await?, "alice bob");
    Ok(())
}

#[tokio::test]
async fn who_channel_lists_members_only() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = named_client(&server, "alice").await?;
    let mut bob = named_client(&server, "bob").await?;
    let _carol = named_client(&server, "carol").await?;
    alice.send_line("/join lobby").await?;
    alice.expect_containing("You are now a member").await?;
    bob.send_line("/join lobby").await?;
    bob.expect_containing("You are now a member").await?;

    alice.send_line("/who lobby").await?;
    assert_eq!(alice.expect_containing("alice").await?, "alice bob");
    Ok(())
}

#[tokio::test]
async fn query_keywords_cannot_be_claimed_as_channels() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = named_client(&server, "alice").await?;

    alice.send_line("/join global").await?;
    assert_eq!(alice.recv_line().await?, "The name global is reserved.");
    alice.send_line("/join channels").await?;
    assert_eq!(alice.recv_line().await?, "The name channels is reserved.");

    // The keyword forms keep working.
    alice.send_line("/who global").await?;
    assert_eq!(alice.expect_containing("alice").await?, "alice");
    alice.send_line("/howmany channels").await?;
    assert_eq!(
        alice.expect_containing("channels open").await?,
        "0/10 channels open."
    );
    Ok(())
}

#[tokio::test]
async fn who_on_an_unknown_channel_is_rejected() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = named_client(&server, "alice").await?;

    alice.send_line("/who backroom").await?;
    assert_eq!(
        alice.recv_line().await?,
        "No channel named backroom is open."
    );
    Ok(())
}

#[tokio::test]
async fn howmany_reports_counts_against_capacity() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = named_client(&server, "alice").await?;
    let mut bob = named_client(&server, "bob").await?;
    alice.send_line("/join lobby").await?;
    alice.expect_containing("You are now a member").await?;

    alice.send_line("/howmany global").await?;
    assert_eq!(
        alice.expect_containing("users connected").await?,
        "2/10 users connected."
    );

    alice.send_line("/howmany channels").await?;
    assert_eq!(
        alice.expect_containing("channels open").await?,
        "1/10 channels open."
    );

    bob.send_line("/howmany lobby").await?;
    assert_eq!(
        bob.expect_containing("members on").await?,
        "1/10 members on lobby."
    );
    Ok(())
}

#[tokio::test]
async fn howmany_on_an_unknown_channel_is_rejected() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = named_client(&server, "alice").await?;

    alice.send_line("/howmany backroom").await?;
    assert_eq!(
        alice.recv_line().await?,
        "No channel named backroom is open."
    );
    Ok(())
}

#[tokio::test]
async fn bare_commands_get_their_usage_lines() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = named_client(&server, "alice").await?;

    let cases = [
        ("/nick", "Usage: /nick <name>"),
        ("/me", "Usage: /me <action>"),
        ("/pm", "Usage: /pm <name> <message>"),
        ("/join", "Usage: /join <channel>"),
        ("/tell lobby", "Usage: /tell <channel> <message>"),
        ("/leave", "Usage: /leave <channel>"),
        ("/who", "Usage: /who global|<channel>"),
        ("/howmany", "Usage: /howmany global|channels|<channel>"),
    ];
    for (line, usage) in cases {
        alice.send_line(line).await?;
        assert_eq!(alice.recv_line().await?, usage);
    }
    Ok(())
}
