//! Messaging commands: `/me`, `/pm`, `/tell`.
//!
//! Plain chat (lines without a leading `/`) is handled directly by the
//! registry dispatch; these handlers cover the addressed forms.

use super::{Context, Handler, HandlerError, HandlerResult};
use async_trait::async_trait;

/// `/me <action>` - broadcast `"<name> <action>"` to all clients.
pub struct MeHandler;

#[async_trait]
impl Handler for MeHandler {
    async fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        if args.is_empty() {
            return Err(HandlerError::MissingArgument("/me <action>"));
        }
        ctx.hub
            .send_to_all(&format!("{} {}", ctx.name(), args))
            .await;
        Ok(())
    }
}

/// `/pm <name> <message>` - deliver to the sender and the target only.
pub struct PmHandler;

#[async_trait]
impl Handler for PmHandler {
    async fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        const USAGE: &str = "/pm <name> <message>";
        let (target, message) = args
            .split_once(char::is_whitespace)
            .map(|(target, rest)| (target, rest.trim_start()))
            .ok_or(HandlerError::MissingArgument(USAGE))?;
        if message.is_empty() {
            return Err(HandlerError::MissingArgument(USAGE));
        }

        let target = ctx
            .hub
            .clients
            .find_by_name(target)
            .ok_or_else(|| HandlerError::UnknownUser(target.to_string()))?;

        ctx.hub
            .send_to_client(
                target.id,
                &format!("{} sends to you: {}", ctx.name(), message),
            )
            .await;
        ctx.reply(format!("You sent to {}: {}", target.name, message))
            .await
    }
}

/// `/tell <channel> <message>` - broadcast to the channel's members.
pub struct TellHandler;

#[async_trait]
impl Handler for TellHandler {
    async fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        const USAGE: &str = "/tell <channel> <message>";
        let (channel, message) = args
            .split_once(char::is_whitespace)
            .map(|(channel, rest)| (channel, rest.trim_start()))
            .ok_or(HandlerError::MissingArgument(USAGE))?;
        if message.is_empty() {
            return Err(HandlerError::MissingArgument(USAGE));
        }

        if !ctx.hub.channels.contains(channel) {
            return Err(HandlerError::UnknownChannel(channel.to_string()));
        }

        ctx.hub
            .send_to_channel(
                channel,
                &format!("{} said on {}: {}", ctx.name(), channel, message),
            )
            .await;
        Ok(())
    }
}
