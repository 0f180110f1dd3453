//! Scripted membership oracle
//!
//! Answers membership checks from a table and records every lookup, so tests
//! can assert how often a user was checked.

use std::collections::HashMap;
use std::sync::Mutex;
use async_trait::async_trait;
use PickBuddy::models::{MemberSnapshot, MemberStatus};
use PickBuddy::services::MembershipOracle;
use PickBuddy::{PickBuddyError, Result};
use super::test_data::named_snapshot;

#[derive(Default)]
pub struct MockOracle {
    statuses: Mutex<HashMap<i64, MemberStatus>>,
    failing: Mutex<Vec<i64>>,
    calls: Mutex<Vec<i64>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oracle where every listed user has the given status
    pub fn with_statuses(entries: &[(i64, MemberStatus)]) -> Self {
        let oracle = Self::new();
        for &(user_id, status) in entries {
            oracle.set_status(user_id, status);
        }
        oracle
    }

    pub fn set_status(&self, user_id: i64, status: MemberStatus) {
        self.statuses.lock().unwrap().insert(user_id, status);
    }

    /// Make lookups of this user fail
    pub fn fail_for(&self, user_id: i64) {
        self.failing.lock().unwrap().push(user_id);
    }

    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, user_id: i64) -> usize {
        self.calls.lock().unwrap().iter().filter(|&&id| id == user_id).count()
    }
}

#[async_trait]
impl MembershipOracle for MockOracle {
    async fn check(&self, _chat_id: i64, user_id: i64) -> Result<MemberSnapshot> {
        self.calls.lock().unwrap().push(user_id);

        if self.failing.lock().unwrap().contains(&user_id) {
            return Err(PickBuddyError::InvalidInput(format!("lookup of {} failed", user_id)));
        }

        // Unknown users count as having left
        let status = self
            .statuses
            .lock()
            .unwrap()
            .get(&user_id)
            .copied()
            .unwrap_or(MemberStatus::Left);

        Ok(named_snapshot(user_id, status))
    }
}
