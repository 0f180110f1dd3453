//! /leaderboard command handler

use teloxide::{prelude::*, types::Message};
use crate::config::MessagesConfig;
use crate::models::RankedPlayer;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::render_template;

/// Handle /leaderboard
pub async fn handle_leaderboard(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let Some((group, _)) = super::guarded(&bot, &msg, &services).await? else {
        return Ok(());
    };

    let messages = &services.settings.messages;
    let text = match services.stats_service.leaderboard(&group).await? {
        Some(leaders) => render_leaderboard(messages, &leaders),
        None => messages.leaderboard_not_enough_picked.clone(),
    };

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

/// Intro, one line per leader, outro; empty parts are left out
pub fn render_leaderboard(messages: &MessagesConfig, leaders: &[RankedPlayer]) -> String {
    let ranks = leaders.iter().map(|entry| {
        let rank = entry.rank.to_string();
        let draw_count = entry.draw_count.to_string();
        let username = entry.player.quiet_name();
        render_template(
            &messages.leaderboard_rank,
            &[
                ("rank", rank.as_str()),
                ("username", username.as_str()),
                ("draw_count", draw_count.as_str()),
            ],
        )
    });

    std::iter::once(messages.leaderboard_intro.clone())
        .chain(ranks)
        .chain(std::iter::once(messages.leaderboard_outro.clone()))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
