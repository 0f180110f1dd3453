//! Bot command menus
//!
//! Group chats get the pick/leaderboard/stats commands. Users allowed to manage
//! weights additionally get `/weights` in their private chat with the bot.

use futures::future::join_all;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, BotCommandScope, ChatId, Recipient};
use tracing::{debug, warn};
use crate::utils::errors::Result;

pub const PICK_COMMAND: &str = "pick";
pub const LEADERBOARD_COMMAND: &str = "leaderboard";
pub const MY_STATS_COMMAND: &str = "mystats";
pub const WEIGHTS_COMMAND: &str = "weights";

#[derive(Clone)]
pub struct CommandRegistry {
    bot: Bot,
}

impl CommandRegistry {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn group_commands() -> Vec<BotCommand> {
        vec![
            BotCommand::new(PICK_COMMAND, "Pick today's player"),
            BotCommand::new(LEADERBOARD_COMMAND, "Show the most picked players"),
            BotCommand::new(MY_STATS_COMMAND, "Show your own pick stats"),
        ]
    }

    pub fn admin_commands() -> Vec<BotCommand> {
        vec![BotCommand::new(WEIGHTS_COMMAND, "Change player weights")]
    }

    /// Publish the group command menu
    pub async fn register_group_commands(&self) -> Result<()> {
        self.bot
            .set_my_commands(Self::group_commands())
            .scope(BotCommandScope::AllGroupChats)
            .await?;
        Ok(())
    }

    /// Show `/weights` in the private chats of the given users.
    ///
    /// Failures are logged per user; users who never opened a chat with the
    /// bot cannot receive a scoped menu.
    pub async fn grant_admin_commands(&self, telegram_ids: &[i64]) {
        let requests = telegram_ids.iter().map(|&telegram_id| async move {
            let result = self
                .bot
                .set_my_commands(Self::admin_commands())
                .scope(BotCommandScope::Chat { chat_id: Recipient::Id(ChatId(telegram_id)) })
                .await;
            (telegram_id, result)
        });

        for (telegram_id, result) in join_all(requests).await {
            match result {
                Ok(_) => debug!(telegram_id = telegram_id, "Admin commands granted"),
                Err(e) => warn!(telegram_id = telegram_id, error = %e, "Failed to grant admin commands"),
            }
        }
    }
}
