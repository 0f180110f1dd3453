//! Group model

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

/// A Telegram group the bot has been added to
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: i64,
    pub telegram_id: i64,
    pub title: String,
    /// The bot's own member status in the chat
    pub status: String,
    pub approved: bool,
    /// Pending approval requests: admin chat id -> message id
    pub approval_messages: Option<Json<HashMap<i64, i32>>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn describe(&self) -> String {
        format!("{} (id: {}, telegram_id: {})", self.title, self.id, self.telegram_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub telegram_id: i64,
    pub title: String,
    pub status: String,
    pub approved: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGroupRequest {
    pub telegram_id: Option<i64>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub approved: Option<bool>,
}

/// Member and draw totals used by the group guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct GroupCounts {
    pub players_count: i64,
    pub draws_count: i64,
}
