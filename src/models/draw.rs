//! Draw model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// The daily pick of a group; unique per (group_id, draw_date)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Draw {
    pub id: i64,
    pub group_id: i64,
    pub player_id: i64,
    pub draw_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDrawRequest {
    pub group_id: i64,
    pub player_id: i64,
    pub draw_date: NaiveDate,
}
