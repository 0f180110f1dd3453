//! Weighted daily pick
//!
//! Samples one player with probability proportional to weight, confirms the
//! player is still in the group through the [`MembershipOracle`], and
//! resamples without that player when they are not. The loop ends with a
//! confirmed winner or an empty roster.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use crate::models::{MemberSnapshot, Player};
use crate::services::membership::MembershipOracle;
use crate::utils::errors::{PickBuddyError, Result};

/// A player together with the live snapshot the oracle returned for them
#[derive(Debug, Clone)]
pub struct CheckedPlayer {
    pub player: Player,
    pub snapshot: MemberSnapshot,
}

/// Everything observed while picking
#[derive(Debug, Clone, Default)]
pub struct PickReport {
    /// Confirmed pick; `None` when the roster was exhausted
    pub winner: Option<CheckedPlayer>,
    /// Sampled players the oracle reported as gone, in sampling order
    pub rejected: Vec<CheckedPlayer>,
}

impl PickReport {
    /// Number of oracle checks performed
    pub fn attempts(&self) -> usize {
        self.rejected.len() + usize::from(self.winner.is_some())
    }

    /// Every oracle observation, winner last
    pub fn checked(&self) -> impl Iterator<Item = &CheckedPlayer> {
        self.rejected.iter().chain(self.winner.iter())
    }
}

pub struct Picker<R> {
    rng: R,
}

impl Picker<StdRng> {
    /// Picker seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng + Send> Picker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Pick a confirmed member of `chat_id` from `roster`.
    ///
    /// Players with a non-positive weight are never sampled. Oracle errors
    /// abort the pick.
    pub async fn pick<O>(&mut self, chat_id: i64, roster: Vec<Player>, oracle: &O) -> Result<PickReport>
    where
        O: MembershipOracle + ?Sized,
    {
        let mut remaining: Vec<Player> = roster.into_iter().filter(|p| p.weight > 0).collect();
        let mut report = PickReport::default();

        while !remaining.is_empty() {
            let index = self.sample(&remaining)?;
            let player = remaining.swap_remove(index);
            let snapshot = oracle.check(chat_id, player.telegram_id).await?;
            let checked = CheckedPlayer { player, snapshot };

            if checked.snapshot.is_member() {
                debug!(
                    chat_id = chat_id,
                    player_id = checked.player.id,
                    attempts = report.rejected.len() + 1,
                    "Pick confirmed"
                );
                report.winner = Some(checked);
                return Ok(report);
            }

            debug!(
                chat_id = chat_id,
                player_id = checked.player.id,
                status = %checked.snapshot.status,
                remaining = remaining.len(),
                "Picked player is no longer a member, resampling"
            );
            report.rejected.push(checked);
        }

        debug!(chat_id = chat_id, rejected = report.rejected.len(), "Roster exhausted without a pick");
        Ok(report)
    }

    fn sample(&mut self, roster: &[Player]) -> Result<usize> {
        let weights = roster.iter().map(|p| p.weight as u32);
        let distribution = WeightedIndex::new(weights)
            .map_err(|e| PickBuddyError::InvalidInput(format!("Invalid roster weights: {}", e)))?;
        Ok(distribution.sample(&mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use async_trait::async_trait;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use crate::models::MemberStatus;

    struct StaticOracle {
        statuses: HashMap<i64, MemberStatus>,
        calls: Mutex<Vec<i64>>,
    }

    impl StaticOracle {
        fn new(statuses: &[(i64, MemberStatus)]) -> Self {
            Self {
                statuses: statuses.iter().copied().collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<i64> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MembershipOracle for StaticOracle {
        async fn check(&self, _chat_id: i64, user_id: i64) -> Result<MemberSnapshot> {
            self.calls.lock().unwrap().push(user_id);
            Ok(MemberSnapshot {
                telegram_id: user_id,
                status: self.statuses.get(&user_id).copied().unwrap_or(MemberStatus::Left),
                first_name: format!("user{}", user_id),
                last_name: None,
                username: None,
            })
        }
    }

    struct FailingOracle;

    #[async_trait]
    impl MembershipOracle for FailingOracle {
        async fn check(&self, _chat_id: i64, _user_id: i64) -> Result<MemberSnapshot> {
            Err(PickBuddyError::InvalidInput("oracle unavailable".to_string()))
        }
    }

    fn player(telegram_id: i64, weight: i32) -> Player {
        Player {
            id: telegram_id,
            group_id: 1,
            telegram_id,
            first_name: format!("user{}", telegram_id),
            last_name: None,
            username: None,
            status: "member".to_string(),
            weight,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn seeded() -> Picker<StdRng> {
        Picker::new(StdRng::seed_from_u64(7))
    }

    #[tokio::test]
    async fn test_empty_roster_yields_no_pick() {
        let oracle = StaticOracle::new(&[]);
        let report = seeded().pick(-100, vec![], &oracle).await.unwrap();

        assert!(report.winner.is_none());
        assert_eq!(report.attempts(), 0);
        assert!(oracle.calls().is_empty());
    }

    #[tokio::test]
    async fn test_last_eligible_player_is_always_picked() {
        let oracle = StaticOracle::new(&[
            (1, MemberStatus::Left),
            (2, MemberStatus::Kicked),
            (3, MemberStatus::Member),
            (4, MemberStatus::Left),
        ]);
        let mut picker = seeded();

        for _ in 0..50 {
            let roster = vec![player(1, 5), player(2, 5), player(3, 1), player(4, 5)];
            let report = picker.pick(-100, roster, &oracle).await.unwrap();
            let winner = report.winner.expect("one member remains");
            assert_eq!(winner.player.telegram_id, 3);
            assert!(report.rejected.iter().all(|c| !c.snapshot.is_member()));
        }
    }

    #[tokio::test]
    async fn test_rejected_players_are_not_rechecked() {
        let oracle = StaticOracle::new(&[(1, MemberStatus::Left), (2, MemberStatus::Left), (3, MemberStatus::Left)]);
        let report = seeded()
            .pick(-100, vec![player(1, 1), player(2, 2), player(3, 3)], &oracle)
            .await
            .unwrap();

        assert!(report.winner.is_none());
        assert_eq!(report.rejected.len(), 3);
        let mut calls = oracle.calls();
        calls.sort_unstable();
        assert_eq!(calls, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_non_positive_weights_are_never_sampled() {
        let oracle = StaticOracle::new(&[(1, MemberStatus::Member), (2, MemberStatus::Member)]);
        let mut picker = seeded();

        for _ in 0..100 {
            let report = picker.pick(-100, vec![player(1, 0), player(2, 2)], &oracle).await.unwrap();
            assert_eq!(report.winner.unwrap().player.telegram_id, 2);
        }

        let report = picker.pick(-100, vec![player(1, 0), player(2, -1)], &oracle).await.unwrap();
        assert!(report.winner.is_none());
    }

    #[tokio::test]
    async fn test_oracle_errors_propagate() {
        let result = seeded().pick(-100, vec![player(1, 3)], &FailingOracle).await;
        assert_matches!(result, Err(PickBuddyError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_frequencies_follow_weights() {
        let oracle = StaticOracle::new(&[
            (1, MemberStatus::Member),
            (2, MemberStatus::Administrator),
            (3, MemberStatus::Creator),
            (4, MemberStatus::Restricted),
        ]);
        let mut picker = seeded();
        let trials = 20_000;
        let mut wins: HashMap<i64, usize> = HashMap::new();

        for _ in 0..trials {
            let roster = vec![player(1, 1), player(2, 2), player(3, 3), player(4, 4)];
            let report = picker.pick(-100, roster, &oracle).await.unwrap();
            *wins.entry(report.winner.unwrap().player.telegram_id).or_default() += 1;
        }

        for (telegram_id, weight) in [(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0)] {
            let observed = wins[&telegram_id] as f64 / trials as f64;
            let expected = weight / 10.0;
            assert!(
                (observed - expected).abs() < 0.02,
                "player {} won {:.3}, expected {:.3}",
                telegram_id,
                observed,
                expected
            );
        }
    }

    #[tokio::test]
    async fn test_frequencies_renormalise_over_eligible_players() {
        // Player 2 left; its weight must not leak to any particular player.
        let oracle = StaticOracle::new(&[(1, MemberStatus::Member), (2, MemberStatus::Left), (3, MemberStatus::Member)]);
        let mut picker = seeded();
        let trials = 20_000;
        let mut first_wins = 0usize;

        for _ in 0..trials {
            let roster = vec![player(1, 1), player(2, 5), player(3, 3)];
            let report = picker.pick(-100, roster, &oracle).await.unwrap();
            if report.winner.unwrap().player.telegram_id == 1 {
                first_wins += 1;
            }
        }

        let observed = first_wins as f64 / trials as f64;
        assert!((observed - 0.25).abs() < 0.02, "player 1 won {:.3}", observed);
    }
}
