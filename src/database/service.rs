//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{DatabasePool, GroupRepository, PlayerRepository, DrawRepository};
use crate::models::*;
use crate::utils::errors::PickBuddyError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub groups: GroupRepository,
    pub players: PlayerRepository,
    pub draws: DrawRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            groups: GroupRepository::new(pool.clone()),
            players: PlayerRepository::new(pool.clone()),
            draws: DrawRepository::new(pool),
        }
    }

    /// Find an approved group by its Telegram chat ID
    pub async fn find_approved_group(&self, telegram_id: i64) -> Result<Option<Group>, PickBuddyError> {
        Ok(self
            .groups
            .find_by_telegram_id(telegram_id)
            .await?
            .filter(|group| group.approved))
    }

    /// Load a player together with its group
    pub async fn player_with_group(&self, player_id: i64) -> Result<(Player, Group), PickBuddyError> {
        let player = self.players.find_by_id(player_id).await?
            .ok_or(PickBuddyError::PlayerNotFound { player_id })?;
        let group = self.groups.find_by_id(player.group_id).await?
            .ok_or(PickBuddyError::GroupNotFound { group_id: player.group_id })?;

        Ok((player, group))
    }
}
