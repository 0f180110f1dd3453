//! Player repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::player::{Player, RankedPlayer, CreatePlayerRequest};
use crate::models::{MemberSnapshot, MemberStatus};
use crate::utils::errors::PickBuddyError;

const PLAYER_COLUMNS: &str = "id, group_id, telegram_id, first_name, last_name, username, status, weight, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PlayerRepository {
    pool: PgPool,
}

impl PlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new player
    pub async fn create(&self, request: CreatePlayerRequest) -> Result<Player, PickBuddyError> {
        let player = sqlx::query_as::<_, Player>(&format!(
            r#"
            INSERT INTO players (group_id, telegram_id, first_name, last_name, username, status, weight, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING {PLAYER_COLUMNS}
            "#
        ))
        .bind(request.group_id)
        .bind(request.telegram_id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.username)
        .bind(request.status)
        .bind(request.weight)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(player)
    }

    /// Insert a batch of players, skipping users already known in the group
    pub async fn create_many(&self, requests: Vec<CreatePlayerRequest>) -> Result<Vec<Player>, PickBuddyError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(requests.len());

        for request in requests {
            let player = sqlx::query_as::<_, Player>(&format!(
                r#"
                INSERT INTO players (group_id, telegram_id, first_name, last_name, username, status, weight, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
                ON CONFLICT (group_id, telegram_id) DO NOTHING
                RETURNING {PLAYER_COLUMNS}
                "#
            ))
            .bind(request.group_id)
            .bind(request.telegram_id)
            .bind(request.first_name)
            .bind(request.last_name)
            .bind(request.username)
            .bind(request.status)
            .bind(request.weight)
            .bind(Utc::now())
            .fetch_optional(&mut *tx)
            .await?;

            created.extend(player);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Find player by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Player>, PickBuddyError> {
        let player = sqlx::query_as::<_, Player>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    /// Find a player of a group by Telegram user ID
    pub async fn find_in_group(&self, group_id: i64, telegram_id: i64) -> Result<Option<Player>, PickBuddyError> {
        let player = sqlx::query_as::<_, Player>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE group_id = $1 AND telegram_id = $2"
        ))
        .bind(group_id)
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    /// Overwrite status and profile fields from a live snapshot
    pub async fn update_profile(&self, id: i64, snapshot: &MemberSnapshot) -> Result<Player, PickBuddyError> {
        let player = sqlx::query_as::<_, Player>(&format!(
            r#"
            UPDATE players
            SET status = $2,
                first_name = $3,
                last_name = $4,
                username = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING {PLAYER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(snapshot.status.as_str())
        .bind(&snapshot.first_name)
        .bind(&snapshot.last_name)
        .bind(&snapshot.username)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(player)
    }

    /// Update player weight
    pub async fn update_weight(&self, id: i64, weight: i32) -> Result<Player, PickBuddyError> {
        let player = sqlx::query_as::<_, Player>(&format!(
            r#"
            UPDATE players
            SET weight = $2,
                updated_at = $3
            WHERE id = $1
            RETURNING {PLAYER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(weight)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(player)
    }

    /// Players of a group whose stored status counts as membership
    pub async fn list_members(&self, group_id: i64) -> Result<Vec<Player>, PickBuddyError> {
        let players = sqlx::query_as::<_, Player>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE group_id = $1 AND status = ANY($2) ORDER BY id ASC"
        ))
        .bind(group_id)
        .bind(MemberStatus::member_status_names())
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    /// Page of member players, ordered by name
    pub async fn list_members_page(&self, group_id: i64, limit: i64, offset: i64) -> Result<Vec<Player>, PickBuddyError> {
        let players = sqlx::query_as::<_, Player>(&format!(
            r#"
            SELECT {PLAYER_COLUMNS} FROM players
            WHERE group_id = $1 AND status = ANY($2)
            ORDER BY COALESCE(username, first_name) ASC, id ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(group_id)
        .bind(MemberStatus::member_status_names())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    /// Count member players of a group
    pub async fn count_members(&self, group_id: i64) -> Result<i64, PickBuddyError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM players WHERE group_id = $1 AND status = ANY($2)"
        )
        .bind(group_id)
        .bind(MemberStatus::member_status_names())
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Member players of a group that were picked at least once, best first.
    /// Ties share a rank.
    pub async fn ranking(&self, group_id: i64, limit: Option<i64>) -> Result<Vec<RankedPlayer>, PickBuddyError> {
        let ranking = sqlx::query_as::<_, RankedPlayer>(
            r#"
            SELECT p.id, p.group_id, p.telegram_id, p.first_name, p.last_name, p.username, p.status, p.weight,
                   p.created_at, p.updated_at,
                   COUNT(d.id) AS draw_count,
                   RANK() OVER (ORDER BY COUNT(d.id) DESC) AS rank
            FROM players p
            INNER JOIN draws d ON d.player_id = p.id
            WHERE p.group_id = $1 AND p.status = ANY($2)
            GROUP BY p.id
            ORDER BY draw_count DESC, p.id ASC
            LIMIT $3
            "#
        )
        .bind(group_id)
        .bind(MemberStatus::member_status_names())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(ranking)
    }
}
