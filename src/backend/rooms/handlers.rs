/**
 * Room HTTP Handlers
 *
 * Thin axum handlers over the room lifecycle manager. Request bodies carry
 * the caller's telegram id, matching the duplex registration message.
 */
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::rooms::lifecycle::RoomLifecycle;
use crate::backend::rooms::store::{Room, RoomWithCount};

/// Request body for `POST /competitions/create-room`.
#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub telegram_id: i64,
    pub language_from_id: i32,
    pub language_to_id: i32,
}

/// Request body for join/leave.
#[derive(Debug, Deserialize)]
pub struct RoomActionRequest {
    pub telegram_id: i64,
    pub room_id: i32,
}

/// Handle `POST /competitions/create-room`.
pub async fn create_room(
    State(lifecycle): State<Arc<RoomLifecycle>>,
    Json(body): Json<CreateRoomRequest>,
) -> Result<Json<Room>, BackendError> {
    let room = lifecycle
        .create_room(body.telegram_id, body.language_from_id, body.language_to_id)
        .await?;
    Ok(Json(room))
}

/// Handle `GET /competitions/rooms`.
pub async fn list_rooms(
    State(lifecycle): State<Arc<RoomLifecycle>>,
) -> Result<Json<Vec<RoomWithCount>>, BackendError> {
    Ok(Json(lifecycle.list_rooms().await?))
}

/// Handle `POST /competitions/join-room`.
pub async fn join_room(
    State(lifecycle): State<Arc<RoomLifecycle>>,
    Json(body): Json<RoomActionRequest>,
) -> Result<StatusCode, BackendError> {
    lifecycle.join(body.room_id, body.telegram_id).await?;
    Ok(StatusCode::OK)
}

/// Handle `PATCH /competitions/leave-room`.
pub async fn leave_room(
    State(lifecycle): State<Arc<RoomLifecycle>>,
    Json(body): Json<RoomActionRequest>,
) -> Result<StatusCode, BackendError> {
    lifecycle.leave(body.room_id, body.telegram_id).await?;
    Ok(StatusCode::OK)
}
