//! Player model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::models::member::{MemberSnapshot, MemberStatus};
use crate::utils::helpers::format_display_name;

/// A group member taking part in the daily draw
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: i64,
    pub group_id: i64,
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub status: String,
    pub weight: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// `@username` if available, otherwise the full name
    pub fn display_name(&self) -> String {
        format_display_name(&self.first_name, self.last_name.as_deref(), self.username.as_deref(), true)
    }

    /// Display name without the `@`, so the user is not notified
    pub fn quiet_name(&self) -> String {
        format_display_name(&self.first_name, self.last_name.as_deref(), self.username.as_deref(), false)
    }

    pub fn is_member(&self) -> bool {
        MemberStatus::is_member_str(&self.status)
    }

    /// Whether the live snapshot differs from the stored record
    pub fn differs_from(&self, snapshot: &MemberSnapshot) -> bool {
        self.status != snapshot.status.as_str()
            || self.first_name != snapshot.first_name
            || self.last_name != snapshot.last_name
            || self.username != snapshot.username
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlayerRequest {
    pub group_id: i64,
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub status: String,
    pub weight: i32,
}

impl CreatePlayerRequest {
    pub fn from_snapshot(group_id: i64, snapshot: &MemberSnapshot, weight: i32) -> Self {
        Self {
            group_id,
            telegram_id: snapshot.telegram_id,
            first_name: snapshot.first_name.clone(),
            last_name: snapshot.last_name.clone(),
            username: snapshot.username.clone(),
            status: snapshot.status.as_str().to_string(),
            weight,
        }
    }
}

/// Leaderboard row: a player with draw count and SQL rank
#[derive(Debug, Clone, FromRow)]
pub struct RankedPlayer {
    #[sqlx(flatten)]
    pub player: Player,
    pub draw_count: i64,
    pub rank: i64,
}
