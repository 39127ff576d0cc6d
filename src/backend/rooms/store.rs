/**
 * Room Store Seam
 *
 * Entities and the data-store interface the room lifecycle and the
 * competition flow are written against. The PostgreSQL implementation
 * lives in `rooms::db`; tests substitute an in-memory store.
 *
 * Multi-step mutations (`apply_join`, `apply_leave`, `create_room`) are
 * specified as transactional: the implementation commits all of the step's
 * writes or none of them.
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::backend::error::BackendResult;
use crate::shared::{PlayerScore, Presence, RoomStatus};

/// A competition room row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Room {
    pub id: i32,
    pub status: RoomStatus,
    pub owner_id: i32,
    pub language_from_id: i32,
    pub language_to_id: i32,
    pub created_at: DateTime<Utc>,
}

/// A participant row: one per (room, user), created on first join.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Participant {
    pub id: i32,
    pub competition_id: i32,
    pub user_id: i32,
    pub user_points: i32,
    pub user_status: Presence,
}

/// A room annotated with its live online participant count.
#[derive(Debug, Clone, Serialize)]
pub struct RoomWithCount {
    #[serde(flatten)]
    pub room: Room,
    pub online_count: i64,
}

/// Persistent store for rooms, participants, and scores.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Insert a room with status `created` plus the owner's participant row
    /// (presence `online`), in one transaction.
    async fn create_room(
        &self,
        owner_id: i32,
        language_from_id: i32,
        language_to_id: i32,
    ) -> BackendResult<Room>;

    async fn room(&self, room_id: i32) -> BackendResult<Option<Room>>;

    /// Every room with its online participant count, oldest first.
    async fn list_rooms(&self) -> BackendResult<Vec<RoomWithCount>>;

    async fn participant(&self, room_id: i32, user_id: i32) -> BackendResult<Option<Participant>>;

    /// Apply a join: optionally transition the room to `active`, then upsert
    /// the participant row to presence `online` (points preserved).
    async fn apply_join(&self, room_id: i32, user_id: i32, activate: bool) -> BackendResult<()>;

    /// Apply a leave: optionally transition the room to `paused`, then set
    /// the participant's presence `offline`.
    async fn apply_leave(&self, room_id: i32, user_id: i32, pause: bool) -> BackendResult<()>;

    async fn set_room_status(&self, room_id: i32, status: RoomStatus) -> BackendResult<()>;

    /// Whether the room owner's participant presence is `online`.
    async fn owner_present(&self, room_id: i32) -> BackendResult<bool>;

    /// Count of participants with presence `online`. Must agree with the
    /// membership index for the same room.
    async fn online_count(&self, room_id: i32) -> BackendResult<i64>;

    /// Online participants ordered by points descending, ties by join order.
    async fn standings(&self, room_id: i32) -> BackendResult<Vec<PlayerScore>>;

    /// Atomically add `delta` to a participant's points. Serialized per
    /// (room, user) at the storage layer; adjustments for different users
    /// commute.
    async fn adjust_points(&self, room_id: i32, user_id: i32, delta: i32) -> BackendResult<()>;
}
