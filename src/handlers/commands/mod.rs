//! Command handlers module
//!
//! This module contains handlers for the group commands (/pick, /leaderboard,
//! /mystats) and the private /weights command.

pub mod pick;
pub mod leaderboard;
pub mod stats;
pub mod weights;

use teloxide::{prelude::*, types::Message, utils::command::BotCommands};
use tracing::debug;
use crate::middleware::{GroupGuard, GuardDecision};
use crate::models::{Group, Player};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "PickBuddy commands:")]
pub enum Command {
    #[command(description = "Pick today's player")]
    Pick,
    #[command(description = "Show the most picked players")]
    Leaderboard,
    #[command(description = "Show your own pick stats")]
    MyStats,
    #[command(description = "Change player weights")]
    Weights,
}

impl Command {
    /// Commands that only make sense inside a group chat
    pub fn is_group_command(&self) -> bool {
        !matches!(self, Command::Weights)
    }
}

/// Main command dispatcher
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command, services: ServiceFactory) -> Result<()> {
    let in_group = msg.chat.is_group() || msg.chat.is_supergroup();

    if cmd.is_group_command() != in_group {
        debug!(chat_id = msg.chat.id.0, command = ?cmd, "Command used in the wrong kind of chat");
        return Ok(());
    }

    match cmd {
        Command::Pick => pick::handle_pick(bot, msg, services).await,
        Command::Leaderboard => leaderboard::handle_leaderboard(bot, msg, services).await,
        Command::MyStats => stats::handle_my_stats(bot, msg, services).await,
        Command::Weights => weights::handle_weights(bot, msg, services).await,
    }
}

/// Run the group guard; on rejection the reason is sent to the chat
pub(crate) async fn guarded(bot: &Bot, msg: &Message, services: &ServiceFactory) -> Result<Option<(Group, Player)>> {
    match GroupGuard::new(services.clone()).check_message(msg).await? {
        GuardDecision::Proceed { group, caller } => Ok(Some((group, caller))),
        GuardDecision::Reject(text) => {
            bot.send_message(msg.chat.id, text).await?;
            Ok(None)
        }
    }
}
