//! /mystats command handler

use teloxide::{prelude::*, types::Message};
use crate::config::MessagesConfig;
use crate::models::{Player, RankedPlayer};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::render_template;

/// Handle /mystats: the caller's rank and draw count in this group
pub async fn handle_my_stats(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let Some((group, caller)) = super::guarded(&bot, &msg, &services).await? else {
        return Ok(());
    };

    let stats = services.stats_service.personal_stats(&group, caller.telegram_id).await?;
    let text = personal_stats_text(&services.settings.messages, &caller, stats.as_ref());

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

/// The caller is named without `@`, so asking does not ping them
pub fn personal_stats_text(messages: &MessagesConfig, caller: &Player, stats: Option<&RankedPlayer>) -> String {
    let username = caller.quiet_name();

    match stats {
        Some(stats) => {
            let rank = stats.rank.to_string();
            let draw_count = stats.draw_count.to_string();
            render_template(
                &messages.personal_stats,
                &[
                    ("username", username.as_str()),
                    ("rank", rank.as_str()),
                    ("draw_count", draw_count.as_str()),
                ],
            )
        }
        None => render_template(&messages.personal_stats_never_picked, &[("username", username.as_str())]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn caller() -> Player {
        Player {
            id: 11,
            group_id: 2,
            telegram_id: 300,
            first_name: "Bea".to_string(),
            last_name: None,
            username: Some("bea".to_string()),
            status: "member".to_string(),
            weight: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_personal_stats_do_not_mention_caller() {
        let messages = MessagesConfig::default();
        let ranked = RankedPlayer { player: caller(), draw_count: 4, rank: 2 };

        let text = personal_stats_text(&messages, &caller(), Some(&ranked));
        assert_eq!(text, "📊 bea, you are ranked #2 with 4 picks.");
        assert!(!text.contains('@'));
    }

    #[test]
    fn test_never_picked_does_not_mention_caller() {
        let text = personal_stats_text(&MessagesConfig::default(), &caller(), None);
        assert_eq!(text, "📊 bea, you have never been picked.");
    }
}
