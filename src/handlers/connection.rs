//! Session commands: `/nick`, `/quit`, `/help`.

use super::{Context, Handler, HandlerError, HandlerResult};
use async_trait::async_trait;
use tracing::info;

/// `/nick <name>` - change the display name and announce the rename.
pub struct NickHandler;

#[async_trait]
impl Handler for NickHandler {
    async fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let name = args
            .split_whitespace()
            .next()
            .ok_or(HandlerError::MissingArgument("/nick <name>"))?;

        let old = ctx.hub.clients.rename(ctx.id, name)?;
        if old != name {
            info!(id = %ctx.id, from = %old, to = %name, "client renamed");
            ctx.hub
                .send_to_all(&format!("{old} renamed to {name}."))
                .await;
        }
        Ok(())
    }
}

/// `/quit` - terminate the handler loop. The departure notice is sent
/// by the connection teardown, not here.
pub struct QuitHandler;

#[async_trait]
impl Handler for QuitHandler {
    async fn handle(&self, _ctx: &mut Context<'_>, _args: &str) -> HandlerResult {
        Err(HandlerError::Quit)
    }
}

const HELP_TEXT: &[&str] = &[
    "Available commands:",
    "  /nick <name>                        change your display name",
    "  /me <action>                        describe an action to everyone",
    "  /pm <name> <message>                send a private message",
    "  /join <channel>                     join (or create) a channel",
    "  /tell <channel> <message>           message a channel",
    "  /leave <channel>                    leave a channel",
    "  /who global|<channel>               list user names",
    "  /howmany global|channels|<channel>  show counts against capacity",
    "  /quit                               disconnect",
    "  /help                               show this text",
];

/// `/help` (also the fallback for unrecognized commands).
pub struct HelpHandler;

#[async_trait]
impl Handler for HelpHandler {
    async fn handle(&self, ctx: &mut Context<'_>, _args: &str) -> HandlerResult {
        for line in HELP_TEXT {
            ctx.reply(*line).await?;
        }
        Ok(())
    }
}
