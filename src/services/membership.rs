//! Membership oracle
//!
//! The live source of truth for "is this user still in the group". The picker
//! and the stats service only see the [`MembershipOracle`] trait; production
//! uses Telegram's `getChatMember`.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, UserId};
use tracing::debug;
use crate::models::MemberSnapshot;
use crate::utils::errors::Result;

/// Current membership status lookup keyed by (group chat, user)
#[async_trait]
pub trait MembershipOracle: Send + Sync {
    /// Live status and profile of `user_id` in the chat `chat_id`
    async fn check(&self, chat_id: i64, user_id: i64) -> Result<MemberSnapshot>;
}

/// Oracle backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramMembership {
    bot: Bot,
}

impl TelegramMembership {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Current administrators of a chat
    pub async fn administrators(&self, chat_id: i64) -> Result<Vec<MemberSnapshot>> {
        let admins = self.bot.get_chat_administrators(ChatId(chat_id)).await?;
        Ok(admins.iter().map(MemberSnapshot::from).collect())
    }
}

#[async_trait]
impl MembershipOracle for TelegramMembership {
    async fn check(&self, chat_id: i64, user_id: i64) -> Result<MemberSnapshot> {
        let member = self
            .bot
            .get_chat_member(ChatId(chat_id), UserId(user_id as u64))
            .await?;
        let snapshot = MemberSnapshot::from(&member);
        debug!(chat_id = chat_id, user_id = user_id, status = %snapshot.status, "Membership checked");
        Ok(snapshot)
    }
}
