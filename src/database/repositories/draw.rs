//! Draw repository implementation

use sqlx::PgPool;
use chrono::{NaiveDate, Utc};
use crate::models::draw::{Draw, CreateDrawRequest};
use crate::utils::errors::PickBuddyError;

const DRAW_COLUMNS: &str = "id, group_id, player_id, draw_date, created_at";

#[derive(Clone, Debug)]
pub struct DrawRepository {
    pool: PgPool,
}

impl DrawRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a draw unless the group already has one for that date.
    ///
    /// Returns `None` when another draw won the (group_id, draw_date) slot.
    pub async fn create_if_absent(&self, request: CreateDrawRequest) -> Result<Option<Draw>, PickBuddyError> {
        let draw = sqlx::query_as::<_, Draw>(&format!(
            r#"
            INSERT INTO draws (group_id, player_id, draw_date, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (group_id, draw_date) DO NOTHING
            RETURNING {DRAW_COLUMNS}
            "#
        ))
        .bind(request.group_id)
        .bind(request.player_id)
        .bind(request.draw_date)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(draw)
    }

    /// Find the draw of a group for a date
    pub async fn find_for_date(&self, group_id: i64, draw_date: NaiveDate) -> Result<Option<Draw>, PickBuddyError> {
        let draw = sqlx::query_as::<_, Draw>(&format!(
            "SELECT {DRAW_COLUMNS} FROM draws WHERE group_id = $1 AND draw_date = $2"
        ))
        .bind(group_id)
        .bind(draw_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(draw)
    }
}
