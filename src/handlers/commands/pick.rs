//! /pick command handler

use teloxide::{prelude::*, types::Message};
use tracing::info;
use crate::services::{DrawOutcome, ServiceFactory};
use crate::utils::errors::Result;
use crate::utils::helpers::render_template;

/// Handle /pick: announce today's pick, drawing one if needed
pub async fn handle_pick(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let Some((group, caller)) = super::guarded(&bot, &msg, &services).await? else {
        return Ok(());
    };

    info!(group_id = group.id, caller_id = caller.telegram_id, "Pick requested");

    let text = pick_text(&services, services.draw_service.pick_for_today(&group).await?);
    bot.send_message(msg.chat.id, text).await?;

    Ok(())
}

/// Fresh picks mention the player; repeats use the quiet name
fn pick_text(services: &ServiceFactory, outcome: DrawOutcome) -> String {
    let messages = &services.settings.messages;

    match outcome {
        DrawOutcome::Created { player, .. } => {
            render_template(&messages.picked, &[("username", player.display_name().as_str())])
        }
        DrawOutcome::Existing { player, .. } => {
            render_template(&messages.already_picked, &[("username", player.quiet_name().as_str())])
        }
        DrawOutcome::NoEligiblePlayer => messages.no_eligible_player.clone(),
    }
}
