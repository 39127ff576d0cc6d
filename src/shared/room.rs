/**
 * Room Domain Types
 *
 * Status and presence enumerations for competition rooms, plus the
 * per-participant standing entry embedded in room broadcasts. These types
 * cross the wire, so their serialized forms are part of the client protocol.
 */
use serde::{Deserialize, Serialize};

/// Lifecycle status of a competition room.
///
/// Rooms start as `created`, become `active` when the owner joins or starts
/// a round, and drop to `paused` whenever the owner leaves. There is no
/// terminal state; a paused room reactivates when the owner rejoins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "room_status", rename_all = "lowercase")]
pub enum RoomStatus {
    Created,
    Active,
    Paused,
}

/// Whether a participant is currently connected to their room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "presence", rename_all = "lowercase")]
pub enum Presence {
    Online,
    Offline,
}

/// One row of a room's standings: who, their avatar, and their points.
///
/// Standings are ordered by points descending; ties break by join order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub username: String,
    pub user_photo_url: Option<String>,
    pub points: i32,
}
