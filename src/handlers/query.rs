//! Query commands: `/who`, `/howmany`.

use super::{Context, Handler, HandlerError, HandlerResult};
use async_trait::async_trait;

/// `/who global|<channel>` - reply with space-joined names. The keyword
/// forms are unambiguous: `global` and `channels` are reserved and can
/// never name a channel.
pub struct WhoHandler;

#[async_trait]
impl Handler for WhoHandler {
    async fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let target = args
            .split_whitespace()
            .next()
            .ok_or(HandlerError::MissingArgument("/who global|<channel>"))?;

        let names: Vec<String> = if target == "global" {
            ctx.hub.clients.all().into_iter().map(|c| c.name).collect()
        } else {
            let members = ctx
                .hub
                .channels
                .members_of(target)
                .ok_or_else(|| HandlerError::UnknownChannel(target.to_string()))?;
            members
                .into_iter()
                .filter_map(|id| ctx.hub.clients.get(id).map(|c| c.name))
                .collect()
        };

        ctx.reply(names.join(" ")).await
    }
}

/// `/howmany global|channels|<channel>` - reply with counts against the
/// configured capacity.
pub struct HowmanyHandler;

#[async_trait]
impl Handler for HowmanyHandler {
    async fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let target = args.split_whitespace().next().ok_or(
            HandlerError::MissingArgument("/howmany global|channels|<channel>"),
        )?;

        let reply = match target {
            "global" => format!(
                "{}/{} users connected.",
                ctx.hub.clients.len(),
                ctx.hub.clients.capacity()
            ),
            "channels" => format!(
                "{}/{} channels open.",
                ctx.hub.channels.len(),
                ctx.hub.channels.capacity()
            ),
            channel => {
                let members = ctx
                    .hub
                    .channels
                    .member_count(channel)
                    .ok_or_else(|| HandlerError::UnknownChannel(channel.to_string()))?;
                format!(
                    "{}/{} members on {}.",
                    members,
                    ctx.hub.channels.member_capacity(),
                    channel
                )
            }
        };

        ctx.reply(reply).await
    }
}
