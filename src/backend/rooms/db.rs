/**
 * PostgreSQL Room Store
 *
 * sqlx-backed implementation of the room store. Point adjustment is a
 * single UPDATE so the read-modify-write happens inside the database row
 * lock; join/leave run in explicit transactions.
 */
use async_trait::async_trait;
use sqlx::PgPool;

use crate::backend::error::BackendResult;
use crate::backend::rooms::store::{Participant, Room, RoomStore, RoomWithCount};
use crate::shared::{PlayerScore, RoomStatus};

pub struct PgRoomStore {
    pool: PgPool,
}

impl PgRoomStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomStore for PgRoomStore {
    async fn create_room(
        &self,
        owner_id: i32,
        language_from_id: i32,
        language_to_id: i32,
    ) -> BackendResult<Room> {
        let mut tx = self.pool.begin().await?;

        let room = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO competition_rooms (status, owner_id, language_from_id, language_to_id)
            VALUES ('created', $1, $2, $3)
            RETURNING id, status, owner_id, language_from_id, language_to_id, created_at
            "#,
        )
        .bind(owner_id)
        .bind(language_from_id)
        .bind(language_to_id)
        .fetch_one(&mut *tx)
        .await?;

        // The owner is a participant from the moment the room exists.
        sqlx::query(
            r#"
            INSERT INTO competition_room_data (competition_id, user_id, user_status)
            VALUES ($1, $2, 'online')
            "#,
        )
        .bind(room.id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(room)
    }

    async fn room(&self, room_id: i32) -> BackendResult<Option<Room>> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            SELECT id, status, owner_id, language_from_id, language_to_id, created_at
            FROM competition_rooms
            WHERE id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    async fn list_rooms(&self) -> BackendResult<Vec<RoomWithCount>> {
        #[derive(sqlx::FromRow)]
        struct RoomRow {
            #[sqlx(flatten)]
            room: Room,
            online_count: i64,
        }

        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT r.id, r.status, r.owner_id, r.language_from_id, r.language_to_id, r.created_at,
                   COUNT(d.id) FILTER (WHERE d.user_status = 'online') AS online_count
            FROM competition_rooms r
            LEFT JOIN competition_room_data d ON d.competition_id = r.id
            GROUP BY r.id
            ORDER BY r.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RoomWithCount {
                room: row.room,
                online_count: row.online_count,
            })
            .collect())
    }

    async fn participant(&self, room_id: i32, user_id: i32) -> BackendResult<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            SELECT id, competition_id, user_id, user_points, user_status
            FROM competition_room_data
            WHERE competition_id = $1 AND user_id = $2
            "#,
        )
        .bind(room_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    async fn apply_join(&self, room_id: i32, user_id: i32, activate: bool) -> BackendResult<()> {
        let mut tx = self.pool.begin().await?;

        if activate {
            sqlx::query("UPDATE competition_rooms SET status = 'active' WHERE id = $1")
                .bind(room_id)
                .execute(&mut *tx)
                .await?;
        }

        // Re-joining updates the existing row; points survive across leaves.
        sqlx::query(
            r#"
            INSERT INTO competition_room_data (competition_id, user_id, user_status)
            VALUES ($1, $2, 'online')
            ON CONFLICT (competition_id, user_id) DO UPDATE SET user_status = 'online'
            "#,
        )
        .bind(room_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn apply_leave(&self, room_id: i32, user_id: i32, pause: bool) -> BackendResult<()> {
        let mut tx = self.pool.begin().await?;

        if pause {
            sqlx::query("UPDATE competition_rooms SET status = 'paused' WHERE id = $1")
                .bind(room_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r#"
            UPDATE competition_room_data SET user_status = 'offline'
            WHERE competition_id = $1 AND user_id = $2
            "#,
        )
        .bind(room_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn set_room_status(&self, room_id: i32, status: RoomStatus) -> BackendResult<()> {
        sqlx::query("UPDATE competition_rooms SET status = $2 WHERE id = $1")
            .bind(room_id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn owner_present(&self, room_id: i32) -> BackendResult<bool> {
        let present: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM competition_rooms r
                JOIN competition_room_data d
                  ON d.competition_id = r.id AND d.user_id = r.owner_id
                WHERE r.id = $1 AND d.user_status = 'online'
            )
            "#,
        )
        .bind(room_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(present)
    }

    async fn online_count(&self, room_id: i32) -> BackendResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM competition_room_data
            WHERE competition_id = $1 AND user_status = 'online'
            "#,
        )
        .bind(room_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn standings(&self, room_id: i32) -> BackendResult<Vec<PlayerScore>> {
        #[derive(sqlx::FromRow)]
        struct StandingRow {
            username: String,
            photo_url: Option<String>,
            user_points: i32,
        }

        let rows = sqlx::query_as::<_, StandingRow>(
            r#"
            SELECT u.username, u.photo_url, d.user_points
            FROM competition_room_data d
            JOIN users u ON u.id = d.user_id
            WHERE d.competition_id = $1 AND d.user_status = 'online'
            ORDER BY d.user_points DESC, d.id ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| PlayerScore {
                username: row.username,
                user_photo_url: row.photo_url,
                points: row.user_points,
            })
            .collect())
    }

    async fn adjust_points(&self, room_id: i32, user_id: i32, delta: i32) -> BackendResult<()> {
        sqlx::query(
            r#"
            UPDATE competition_room_data SET user_points = user_points + $3
            WHERE competition_id = $1 AND user_id = $2
            "#,
        )
        .bind(room_id)
        .bind(user_id)
        .bind(delta)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
