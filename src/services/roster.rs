//! Roster service implementation
//!
//! Keeps player records in line with live Telegram membership and manages
//! player weights.

use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::{debug, info};
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::models::{CreatePlayerRequest, Group, MemberSnapshot, Player};
use crate::services::commands::CommandRegistry;
use crate::services::membership::MembershipOracle;
use crate::utils::errors::{PickBuddyError, Result};
use crate::utils::helpers::calculate_offset;
use crate::utils::logging;

/// What syncing a member did to the stored record
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    Added(Player),
    Updated(Player),
    Unchanged(Player),
}

impl SyncOutcome {
    pub fn player(&self) -> &Player {
        match self {
            SyncOutcome::Added(p) | SyncOutcome::Updated(p) | SyncOutcome::Unchanged(p) => p,
        }
    }

    pub fn changed(&self) -> bool {
        !matches!(self, SyncOutcome::Unchanged(_))
    }
}

/// Result of a weight change request
#[derive(Debug, Clone)]
pub struct WeightChange {
    pub player: Player,
    pub changed: bool,
}

/// One page of a paginated listing
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total: i64,
}

#[derive(Clone)]
pub struct RosterService {
    database: DatabaseService,
    oracle: Arc<dyn MembershipOracle>,
    commands: CommandRegistry,
    settings: Settings,
}

impl RosterService {
    pub fn new(
        database: DatabaseService,
        oracle: Arc<dyn MembershipOracle>,
        commands: CommandRegistry,
        settings: Settings,
    ) -> Self {
        Self {
            database,
            oracle,
            commands,
            settings,
        }
    }

    /// Insert or refresh a player from a live snapshot
    pub async fn sync_member(&self, group: &Group, snapshot: &MemberSnapshot) -> Result<SyncOutcome> {
        let existing = self.database.players.find_in_group(group.id, snapshot.telegram_id).await?;

        let outcome = match existing {
            None => {
                let request = CreatePlayerRequest::from_snapshot(group.id, snapshot, self.settings.draw.default_weight);
                let player = self.database.players.create(request).await?;
                logging::log_player_event(player.id, group.id, player.telegram_id, "added", &player.status);
                SyncOutcome::Added(player)
            }
            Some(player) if player.differs_from(snapshot) => {
                let player = self.database.players.update_profile(player.id, snapshot).await?;
                logging::log_player_event(player.id, group.id, player.telegram_id, "updated", &player.status);
                SyncOutcome::Updated(player)
            }
            Some(player) => SyncOutcome::Unchanged(player),
        };

        Ok(outcome)
    }

    /// Look the user up through the oracle and sync the result.
    ///
    /// Users who just gained admin rights get the `/weights` command.
    pub async fn sync_user(&self, group: &Group, telegram_user_id: i64) -> Result<SyncOutcome> {
        let snapshot = self.oracle.check(group.telegram_id, telegram_user_id).await?;
        let outcome = self.sync_member(group, &snapshot).await?;

        if outcome.changed() && self.has_admin_rights(outcome.player()) {
            self.commands.grant_admin_commands(&[telegram_user_id]).await;
        }

        Ok(outcome)
    }

    /// Add new players in bulk; non-members and already known users are skipped
    pub async fn seed_players(&self, group: &Group, snapshots: &[MemberSnapshot]) -> Result<Vec<Player>> {
        let requests: Vec<CreatePlayerRequest> = snapshots
            .iter()
            .filter(|s| s.is_member())
            .map(|s| CreatePlayerRequest::from_snapshot(group.id, s, self.settings.draw.default_weight))
            .collect();

        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let players = self.database.players.create_many(requests).await?;
        for player in &players {
            logging::log_player_event(player.id, group.id, player.telegram_id, "added", &player.status);
        }

        Ok(players)
    }

    /// Allowed weight values
    pub fn weight_range(&self) -> RangeInclusive<i32> {
        self.settings.draw.min_weight..=self.settings.draw.max_weight
    }

    pub fn validate_weight(&self, weight: i32) -> Result<()> {
        if self.weight_range().contains(&weight) {
            Ok(())
        } else {
            Err(PickBuddyError::InvalidWeight {
                weight,
                min: self.settings.draw.min_weight,
                max: self.settings.draw.max_weight,
            })
        }
    }

    /// Change a player's weight; unchanged weights are not written
    pub async fn set_weight(&self, player: &Player, weight: i32) -> Result<WeightChange> {
        self.validate_weight(weight)?;

        if player.weight == weight {
            debug!(player_id = player.id, weight = weight, "Weight unchanged");
            return Ok(WeightChange {
                player: player.clone(),
                changed: false,
            });
        }

        let updated = self.database.players.update_weight(player.id, weight).await?;
        info!(player_id = updated.id, group_id = updated.group_id, old = player.weight, new = weight, "Player weight updated");

        Ok(WeightChange {
            player: updated,
            changed: true,
        })
    }

    /// Whether this player record allows managing weights in its group
    pub fn has_admin_rights(&self, player: &Player) -> bool {
        self.settings.grants_admin_rights(&player.status) || self.settings.is_bot_admin(player.telegram_id)
    }

    /// Whether the user may manage weights in the group
    pub async fn can_manage(&self, group: &Group, telegram_user_id: i64) -> Result<bool> {
        let player = self.database.players.find_in_group(group.id, telegram_user_id).await?;
        Ok(player.map(|p| self.has_admin_rights(&p)).unwrap_or(false))
    }

    /// Groups whose weights the user may manage
    pub async fn manageable_groups(&self, telegram_user_id: i64, page: u32) -> Result<Page<Group>> {
        let page_size = self.settings.draw.groups_per_page;
        let statuses = &self.settings.bot.admin_rights_statuses;
        let any_member = self.settings.is_bot_admin(telegram_user_id);

        let items = self
            .database
            .groups
            .list_manageable(
                telegram_user_id,
                statuses,
                any_member,
                i64::from(page_size),
                calculate_offset(page, page_size),
            )
            .await?;
        let total = self
            .database
            .groups
            .count_manageable(telegram_user_id, statuses, any_member)
            .await?;

        Ok(Page { items, page, total })
    }

    /// Member players of a group, by name
    pub async fn players_page(&self, group: &Group, page: u32) -> Result<Page<Player>> {
        let page_size = self.settings.draw.players_per_page;
        let items = self
            .database
            .players
            .list_members_page(group.id, i64::from(page_size), calculate_offset(page, page_size))
            .await?;
        let total = self.database.players.count_members(group.id).await?;

        Ok(Page { items, page, total })
    }
}
