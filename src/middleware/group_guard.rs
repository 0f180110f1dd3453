//! Group guard middleware
//!
//! Gates the group commands: the chat must be an approved group, and a group
//! that never had a draw needs enough players before the first one.

use teloxide::types::{Message, User};
use tracing::debug;
use crate::models::{Group, Player};
use crate::services::ServiceFactory;
use crate::utils::errors::{PickBuddyError, Result};
use crate::utils::helpers::render_template;

/// Whether a group command may run
#[derive(Debug, Clone)]
pub enum GuardDecision {
    Proceed { group: Group, caller: Player },
    /// Reply with this text and stop
    Reject(String),
}

#[derive(Clone)]
pub struct GroupGuard {
    services: ServiceFactory,
}

impl GroupGuard {
    pub fn new(services: ServiceFactory) -> Self {
        Self { services }
    }

    /// Check a group command message
    pub async fn check_message(&self, msg: &Message) -> Result<GuardDecision> {
        let user = msg.from.as_ref().ok_or_else(|| {
            PickBuddyError::InvalidInput("No user in message".to_string())
        })?;

        self.check(msg.chat.id.0, user).await
    }

    /// Check a caller in a chat; the caller is synced as a player on the way
    pub async fn check(&self, chat_id: i64, user: &User) -> Result<GuardDecision> {
        let settings = &self.services.settings;

        let Some(group) = self.services.database.find_approved_group(chat_id).await? else {
            debug!(chat_id = chat_id, "Command from a non-approved chat");
            return Ok(GuardDecision::Reject(settings.messages.non_approved_group.clone()));
        };

        let caller = self
            .services
            .roster_service
            .sync_user(&group, user.id.0 as i64)
            .await?
            .player()
            .clone();

        let counts = self.services.database.groups.counts(group.id).await?;
        if counts.players_count < settings.draw.min_players && counts.draws_count == 0 {
            debug!(group_id = group.id, players = counts.players_count, "Not enough players for the first draw");
            let min_players = settings.draw.min_players.to_string();
            return Ok(GuardDecision::Reject(render_template(
                &settings.messages.not_enough_players,
                &[("min_players", min_players.as_str())],
            )));
        }

        Ok(GuardDecision::Proceed { group, caller })
    }
}
