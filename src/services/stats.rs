//! Leaderboard and personal statistics

use std::sync::Arc;
use futures::future::try_join_all;
use tracing::debug;
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::models::{Group, RankedPlayer};
use crate::services::membership::MembershipOracle;
use crate::utils::errors::Result;
use crate::utils::logging;

#[derive(Clone)]
pub struct StatsService {
    database: DatabaseService,
    oracle: Arc<dyn MembershipOracle>,
    settings: Settings,
}

impl StatsService {
    pub fn new(database: DatabaseService, oracle: Arc<dyn MembershipOracle>, settings: Settings) -> Self {
        Self {
            database,
            oracle,
            settings,
        }
    }

    /// Top players of the group by draw count, with live-refreshed names.
    ///
    /// Returns `None` when fewer than two players have ever been picked.
    /// Leaders who turn out to have left are dropped and the ranking is
    /// recomputed without them.
    pub async fn leaderboard(&self, group: &Group) -> Result<Option<Vec<RankedPlayer>>> {
        loop {
            let mut leaders = self
                .database
                .players
                .ranking(group.id, Some(self.settings.draw.leaderboard_size))
                .await?;

            if leaders.len() < 2 {
                return Ok(None);
            }

            let checks = leaders
                .iter()
                .map(|leader| self.oracle.check(group.telegram_id, leader.player.telegram_id));
            let snapshots = try_join_all(checks).await?;

            let mut departed = 0;
            for (leader, snapshot) in leaders.iter_mut().zip(snapshots.iter()) {
                if leader.player.differs_from(snapshot) {
                    leader.player = self.database.players.update_profile(leader.player.id, snapshot).await?;
                    logging::log_player_event(
                        leader.player.id,
                        group.id,
                        leader.player.telegram_id,
                        "updated",
                        &leader.player.status,
                    );
                }
                if !snapshot.is_member() {
                    departed += 1;
                }
            }

            if departed == 0 {
                return Ok(Some(leaders));
            }

            debug!(group_id = group.id, departed = departed, "Leaders left the group, recomputing leaderboard");
        }
    }

    /// Rank and draw count of one user in the group, if ever picked
    pub async fn personal_stats(&self, group: &Group, telegram_user_id: i64) -> Result<Option<RankedPlayer>> {
        let ranking = self.database.players.ranking(group.id, None).await?;
        Ok(ranking
            .into_iter()
            .find(|entry| entry.player.telegram_id == telegram_user_id))
    }
}
