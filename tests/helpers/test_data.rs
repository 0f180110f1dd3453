//! Test data helpers
//!
//! Builders for players and membership snapshots with fake names.

use chrono::Utc;
use fake::faker::internet::en::Username;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use PickBuddy::models::{MemberSnapshot, MemberStatus, Player};

pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}

pub fn test_chat_id() -> i64 {
    -1001234567890
}

pub fn test_admin_id() -> i64 {
    555666777
}

/// Snapshot of a user with random names
pub fn fake_snapshot(telegram_id: i64, status: MemberStatus) -> MemberSnapshot {
    MemberSnapshot {
        telegram_id,
        status,
        first_name: FirstName().fake(),
        last_name: Some(LastName().fake()),
        username: Some(Username().fake()),
    }
}

/// In-memory player; its Telegram id is `1000 + id`
pub fn fake_player(id: i64, weight: i32) -> Player {
    Player {
        id,
        group_id: 1,
        telegram_id: 1000 + id,
        first_name: FirstName().fake(),
        last_name: None,
        username: Some(Username().fake()),
        status: MemberStatus::Member.as_str().to_string(),
        weight,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Players with ids `1..=weights.len()` and the given weights
pub fn fake_roster(weights: &[i32]) -> Vec<Player> {
    weights
        .iter()
        .enumerate()
        .map(|(index, &weight)| fake_player(index as i64 + 1, weight))
        .collect()
}

/// Snapshot with stable names derived from the id
pub fn named_snapshot(telegram_id: i64, status: MemberStatus) -> MemberSnapshot {
    MemberSnapshot {
        telegram_id,
        status,
        first_name: format!("User{}", telegram_id),
        last_name: None,
        username: Some(format!("user{}", telegram_id)),
    }
}
