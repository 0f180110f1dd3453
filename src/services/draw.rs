//! Draw service implementation
//!
//! Runs the daily pick for a group and records it, keeping at most one draw
//! per group per calendar date.

use std::sync::Arc;
use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};
use crate::database::DatabaseService;
use crate::models::{CreateDrawRequest, Draw, Group, Player};
use crate::services::membership::MembershipOracle;
use crate::services::picker::{PickReport, Picker};
use crate::utils::errors::{PickBuddyError, Result};
use crate::utils::logging;

/// Result of asking for a group's pick of the day
#[derive(Debug, Clone)]
pub enum DrawOutcome {
    /// A new draw was recorded by this call
    Created { draw: Draw, player: Player },
    /// The group already had a draw for the date
    Existing { draw: Draw, player: Player },
    /// Every roster entry was checked and none is still a member
    NoEligiblePlayer,
}

#[derive(Clone)]
pub struct DrawService {
    database: DatabaseService,
    oracle: Arc<dyn MembershipOracle>,
}

impl DrawService {
    pub fn new(database: DatabaseService, oracle: Arc<dyn MembershipOracle>) -> Self {
        Self { database, oracle }
    }

    /// Pick of the day for the server's local date
    pub async fn pick_for_today(&self, group: &Group) -> Result<DrawOutcome> {
        self.pick_for_date(group, Local::now().date_naive()).await
    }

    pub async fn pick_for_date(&self, group: &Group, draw_date: NaiveDate) -> Result<DrawOutcome> {
        if let Some(draw) = self.database.draws.find_for_date(group.id, draw_date).await? {
            debug!(group_id = group.id, draw_id = draw.id, "Draw already made for date");
            return self.existing(draw).await;
        }

        let roster = self.database.players.list_members(group.id).await?;
        debug!(group_id = group.id, roster = roster.len(), "Picking from roster");

        let report = Picker::from_entropy()
            .pick(group.telegram_id, roster, self.oracle.as_ref())
            .await?;
        let winner = self.persist_observations(group, &report).await?;

        let Some(winner) = winner else {
            info!(group_id = group.id, checked = report.attempts(), "No eligible player left to pick");
            return Ok(DrawOutcome::NoEligiblePlayer);
        };

        let request = CreateDrawRequest {
            group_id: group.id,
            player_id: winner.id,
            draw_date,
        };

        match self.database.draws.create_if_absent(request).await? {
            Some(draw) => {
                logging::log_draw(group.id, winner.id, draw_date, report.attempts());
                Ok(DrawOutcome::Created { draw, player: winner })
            }
            None => {
                warn!(group_id = group.id, "Concurrent draw recorded first, using it");
                let draw = self
                    .database
                    .draws
                    .find_for_date(group.id, draw_date)
                    .await?
                    .ok_or(PickBuddyError::DrawNotFound { group_id: group.id, draw_date })?;
                self.existing(draw).await
            }
        }
    }

    /// Store refreshed status and profile fields; returns the stored winner
    async fn persist_observations(&self, group: &Group, report: &PickReport) -> Result<Option<Player>> {
        let mut winner = None;

        for checked in report.checked() {
            let player = if checked.player.differs_from(&checked.snapshot) {
                let updated = self
                    .database
                    .players
                    .update_profile(checked.player.id, &checked.snapshot)
                    .await?;
                logging::log_player_event(updated.id, group.id, updated.telegram_id, "updated", &updated.status);
                updated
            } else {
                checked.player.clone()
            };

            if checked.snapshot.is_member() {
                winner = Some(player);
            }
        }

        Ok(winner)
    }

    async fn existing(&self, draw: Draw) -> Result<DrawOutcome> {
        let player = self
            .database
            .players
            .find_by_id(draw.player_id)
            .await?
            .ok_or(PickBuddyError::PlayerNotFound { player_id: draw.player_id })?;

        Ok(DrawOutcome::Existing { draw, player })
    }
}
