//! Channel membership commands: `/join`, `/leave`.

use super::{Context, Handler, HandlerError, HandlerResult};
use async_trait::async_trait;
use tracing::{debug, info};

/// `/join <channel>` - find-or-create plus membership insert, then the
/// join notice. The notice is sent only after the sender is actually a
/// member, so every recipient observes a consistent state.
pub struct JoinHandler;

#[async_trait]
impl Handler for JoinHandler {
    async fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let channel = args
            .split_whitespace()
            .next()
            .ok_or(HandlerError::MissingArgument("/join <channel>"))?;

        let outcome = ctx.hub.channels.join(channel, ctx.id)?;
        let name = ctx.name();
        if outcome.created {
            info!(%channel, by = %name, "channel created");
        }

        ctx.hub
            .send_to_channel(channel, &format!("{name} joined {channel}."))
            .await;

        let members = outcome.member_count;
        let plural = if members == 1 { "member" } else { "members" };
        ctx.reply(format!(
            "You are now a member of {channel} ({members} {plural})."
        ))
        .await
    }
}

/// `/leave <channel>` - leave, notify the remaining members, and delete
/// the channel if this emptied it. Not-a-member and unknown-channel
/// cases are silently ignored.
pub struct LeaveHandler;

#[async_trait]
impl Handler for LeaveHandler {
    async fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let channel = args
            .split_whitespace()
            .next()
            .ok_or(HandlerError::MissingArgument("/leave <channel>"))?;

        match ctx.hub.channels.leave(channel, ctx.id) {
            Some(0) => {
                debug!(%channel, "channel deleted with its last member");
            }
            Some(_) => {
                let name = ctx.name();
                ctx.hub
                    .send_to_channel(channel, &format!("{name} left {channel}."))
                    .await;
            }
            None => {}
        }
        Ok(())
    }
}
