//! Command handlers.
//!
//! This module contains the Handler trait and the command registry that
//! dispatches each received line. Lines that do not start with `/` are
//! plain chat; `/`-prefixed lines are split into a command token and the
//! remainder, which the matching handler interprets. Command-level
//! failures produce a reply to the offending client only.

mod channel;
mod connection;
mod messaging;
mod query;

pub use channel::{JoinHandler, LeaveHandler};
pub use connection::{HelpHandler, NickHandler, QuitHandler};
pub use messaging::{MeHandler, PmHandler, TellHandler};
pub use query::{HowmanyHandler, WhoHandler};

use crate::error::RegistryError;
use crate::state::{ClientId, Hub, Outbox};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The sender's identity.
    pub id: ClientId,
    /// Shared server state.
    pub hub: &'a Arc<Hub>,
    /// Outbox of the sending client, for direct replies.
    pub outbox: &'a Outbox,
}

impl Context<'_> {
    /// Current display name of the sender. Falls back to the stringified
    /// identity if the client has already been unregistered.
    pub fn name(&self) -> String {
        self.hub
            .clients
            .get(self.id)
            .map(|c| c.name)
            .unwrap_or_else(|| self.id.to_string())
    }

    /// Queue a reply line to the sending client only.
    pub async fn reply(&self, line: impl Into<String>) -> HandlerResult {
        self.outbox.send(line.into()).await?;
        Ok(())
    }
}

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A required argument is missing; the string is the usage line.
    #[error("missing argument, usage: {0}")]
    MissingArgument(&'static str),

    #[error("no user named {0}")]
    UnknownUser(String),

    #[error("no channel named {0}")]
    UnknownChannel(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("send error: {0}")]
    Send(#[from] mpsc::error::SendError<String>),

    /// Terminate the handler loop (`/quit`).
    #[error("client quit")]
    Quit,
}

impl HandlerError {
    /// Client-visible reply for this error, if any.
    ///
    /// `Send` and `Quit` return `None`: they drive the connection into
    /// its closing state instead of producing a reply.
    pub fn to_reply(&self) -> Option<String> {
        match self {
            Self::MissingArgument(usage) => Some(format!("Usage: {usage}")),
            Self::UnknownUser(name) => Some(format!("No user named {name} is connected.")),
            Self::UnknownChannel(name) => Some(format!("No channel named {name} is open.")),
            Self::Registry(err) => Some(err.to_reply()),
            Self::Send(_) | Self::Quit => None,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// Trait implemented by all command handlers.
///
/// `args` is the remainder of the line after the command token, with
/// leading whitespace stripped.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult;
}

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        handlers.insert("/nick", Box::new(NickHandler));
        handlers.insert("/me", Box::new(MeHandler));
        handlers.insert("/pm", Box::new(PmHandler));
        handlers.insert("/join", Box::new(JoinHandler));
        handlers.insert("/tell", Box::new(TellHandler));
        handlers.insert("/leave", Box::new(LeaveHandler));
        handlers.insert("/who", Box::new(WhoHandler));
        handlers.insert("/howmany", Box::new(HowmanyHandler));
        handlers.insert("/quit", Box::new(QuitHandler));
        handlers.insert("/help", Box::new(HelpHandler));

        Self { handlers }
    }

    /// Dispatch one received line.
    ///
    /// Plain text is rendered as `"<name> says: <text>"` and broadcast
    /// to all clients; unrecognized commands get the help text. Errors
    /// with a client-visible reply are consumed here; `Quit` and send
    /// failures propagate to the connection loop.
    pub async fn dispatch(&self, ctx: &mut Context<'_>, line: &str) -> HandlerResult {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        if !line.starts_with('/') {
            let text = format!("{} says: {}", ctx.name(), line);
            ctx.hub.send_to_all(&text).await;
            return Ok(());
        }

        let (command, args) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim_start()),
            None => (line, ""),
        };

        let result = match self.handlers.get(command) {
            Some(handler) => handler.handle(ctx, args).await,
            None => HelpHandler.handle(ctx, "").await,
        };

        match result {
            Err(err) => {
                if let Some(reply) = err.to_reply() {
                    debug!(id = %ctx.id, command, error = %err, "command failed");
                    ctx.reply(reply).await
                } else {
                    Err(err)
                }
            }
            ok => ok,
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
