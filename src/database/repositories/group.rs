//! Group repository implementation

use std::collections::HashMap;
use sqlx::PgPool;
use sqlx::types::Json;
use chrono::Utc;
use crate::models::group::{Group, GroupCounts, CreateGroupRequest, UpdateGroupRequest};
use crate::models::MemberStatus;
use crate::utils::errors::PickBuddyError;

const GROUP_COLUMNS: &str = "id, telegram_id, title, status, approved, approval_messages, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new group
    pub async fn create(&self, request: CreateGroupRequest) -> Result<Group, PickBuddyError> {
        let group = sqlx::query_as::<_, Group>(&format!(
            r#"
            INSERT INTO groups (telegram_id, title, status, approved, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(request.telegram_id)
        .bind(request.title)
        .bind(request.status)
        .bind(request.approved)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(group)
    }

    /// Find group by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Group>, PickBuddyError> {
        let group = sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Find group by Telegram chat ID
    pub async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<Group>, PickBuddyError> {
        let group = sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE telegram_id = $1"
        ))
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Update group
    pub async fn update(&self, id: i64, request: UpdateGroupRequest) -> Result<Group, PickBuddyError> {
        let group = sqlx::query_as::<_, Group>(&format!(
            r#"
            UPDATE groups
            SET telegram_id = COALESCE($2, telegram_id),
                title = COALESCE($3, title),
                status = COALESCE($4, status),
                approved = COALESCE($5, approved),
                updated_at = $6
            WHERE id = $1
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.telegram_id)
        .bind(request.title)
        .bind(request.status)
        .bind(request.approved)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(group)
    }

    /// Replace the pending approval messages (None clears them)
    pub async fn set_approval_messages(
        &self,
        id: i64,
        messages: Option<HashMap<i64, i32>>,
    ) -> Result<Group, PickBuddyError> {
        let group = sqlx::query_as::<_, Group>(&format!(
            r#"
            UPDATE groups
            SET approval_messages = $2,
                updated_at = $3
            WHERE id = $1
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(messages.map(Json))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(group)
    }

    /// Delete group together with its players and draws
    pub async fn delete(&self, id: i64) -> Result<(), PickBuddyError> {
        sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Member players and recorded draws of a group
    pub async fn counts(&self, id: i64) -> Result<GroupCounts, PickBuddyError> {
        let counts = sqlx::query_as::<_, GroupCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM players WHERE group_id = $1 AND status = ANY($2)) AS players_count,
                (SELECT COUNT(*) FROM draws WHERE group_id = $1) AS draws_count
            "#
        )
        .bind(id)
        .bind(MemberStatus::member_status_names())
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Approved groups where the user holds a player record with one of the
    /// given statuses (or any member status when `any_member` is set)
    pub async fn list_manageable(
        &self,
        telegram_user_id: i64,
        statuses: &[String],
        any_member: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Group>, PickBuddyError> {
        let groups = sqlx::query_as::<_, Group>(
            r#"
            SELECT g.id, g.telegram_id, g.title, g.status, g.approved, g.approval_messages, g.created_at, g.updated_at
            FROM groups g
            INNER JOIN players p ON p.group_id = g.id
            WHERE g.approved = true
              AND g.status = ANY($2)
              AND p.telegram_id = $1
              AND (p.status = ANY($3) OR ($4 AND p.status = ANY($2)))
            ORDER BY g.title ASC, g.id ASC
            LIMIT $5 OFFSET $6
            "#
        )
        .bind(telegram_user_id)
        .bind(MemberStatus::member_status_names())
        .bind(statuses)
        .bind(any_member)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    /// Count for `list_manageable`
    pub async fn count_manageable(
        &self,
        telegram_user_id: i64,
        statuses: &[String],
        any_member: bool,
    ) -> Result<i64, PickBuddyError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM groups g
            INNER JOIN players p ON p.group_id = g.id
            WHERE g.approved = true
              AND g.status = ANY($2)
              AND p.telegram_id = $1
              AND (p.status = ANY($3) OR ($4 AND p.status = ANY($2)))
            "#
        )
        .bind(telegram_user_id)
        .bind(MemberStatus::member_status_names())
        .bind(statuses)
        .bind(any_member)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
