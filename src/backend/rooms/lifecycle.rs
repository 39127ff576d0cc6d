/**
 * Room Lifecycle Manager
 *
 * Creates rooms, applies join/leave, drives the status machine, and
 * broadcasts membership changes.
 *
 * # Status Machine
 *
 * `created --owner joins/starts--> active --owner leaves--> paused
 * --owner rejoins--> active`. Only the owner's movements transition the
 * room; other participants come and go without touching its status. Rooms
 * are never closed in scope.
 *
 * # Broadcast Ordering
 *
 * Every broadcast here is sent after its mutation committed, so clients
 * never observe an event describing state that does not exist yet. Fan-out
 * is best-effort; see the connection registry.
 */
use std::sync::Arc;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::realtime::{broadcast_to_room, ConnectionRegistry};
use crate::backend::rooms::membership::MembershipIndex;
use crate::backend::rooms::store::{Room, RoomStore, RoomWithCount};
use crate::backend::users::{UserDirectory, UserProfile};
use crate::shared::{NewRoomData, RoomEvent, RoomStatus};

pub struct RoomLifecycle {
    store: Arc<dyn RoomStore>,
    users: Arc<dyn UserDirectory>,
    membership: Arc<dyn MembershipIndex>,
    registry: ConnectionRegistry,
}

impl RoomLifecycle {
    pub fn new(
        store: Arc<dyn RoomStore>,
        users: Arc<dyn UserDirectory>,
        membership: Arc<dyn MembershipIndex>,
        registry: ConnectionRegistry,
    ) -> Self {
        Self {
            store,
            users,
            membership,
            registry,
        }
    }

    /// Create a room owned by `telegram_id` and announce it to everyone.
    ///
    /// The owner gets a participant row (presence `online`) in the same
    /// transaction as the room itself.
    pub async fn create_room(
        &self,
        telegram_id: i64,
        language_from_id: i32,
        language_to_id: i32,
    ) -> BackendResult<Room> {
        let owner = self.resolve_user(telegram_id).await?;
        let room = self
            .store
            .create_room(owner.id, language_from_id, language_to_id)
            .await?;

        tracing::info!(room_id = room.id, owner = %owner.username, "competition room created");

        self.registry.broadcast_all(&RoomEvent::CreatedNewRoom {
            room_data: NewRoomData {
                room_id: room.id,
                owner: owner.username,
                language_from_id,
                language_to_id,
            },
        });

        Ok(room)
    }

    /// Every room with its live online count, for the lobby listing.
    pub async fn list_rooms(&self) -> BackendResult<Vec<RoomWithCount>> {
        self.store.list_rooms().await
    }

    /// Join a room: owner arrival reactivates it, the participant row is
    /// upserted to `online`, membership is registered, and the room hears
    /// `user_join`. Calling twice leaves a single participant row.
    pub async fn join(&self, room_id: i32, telegram_id: i64) -> BackendResult<()> {
        let user = self.resolve_user(telegram_id).await?;
        let room = self.resolve_room(room_id).await?;

        let activate = user.id == room.owner_id && room.status != RoomStatus::Active;
        self.store.apply_join(room_id, user.id, activate).await?;
        self.membership.add_user_to_room(telegram_id, room_id).await?;

        tracing::info!(room_id, telegram_id, "user joined room");
        self.broadcast_membership_change(room_id, &user.username, true).await
    }

    /// Leave a room: the owner leaving pauses it, presence flips to
    /// `offline`, membership is removed, and the remaining members hear
    /// `user_leave`.
    pub async fn leave(&self, room_id: i32, telegram_id: i64) -> BackendResult<()> {
        let user = self.resolve_user(telegram_id).await?;
        let room = self.resolve_room(room_id).await?;

        let pause = user.id == room.owner_id;
        self.store.apply_leave(room_id, user.id, pause).await?;
        self.membership
            .remove_user_from_room(telegram_id, Some(room_id))
            .await?;

        tracing::info!(room_id, telegram_id, "user left room");
        self.broadcast_membership_change(room_id, &user.username, false).await
    }

    /// Transport-level disconnect: resolve the user's current room through
    /// the reverse pointer and run leave semantics there. No recorded room
    /// means nothing to do.
    pub async fn change_presence_on_disconnect(&self, telegram_id: i64) -> BackendResult<()> {
        let Some(room_id) = self.membership.room_of_user(telegram_id).await? else {
            return Ok(());
        };
        self.leave(room_id, telegram_id).await
    }

    /// Broadcast a `user_join`/`user_leave` event carrying the room's fresh
    /// status, online count, and standings.
    async fn broadcast_membership_change(
        &self,
        room_id: i32,
        username: &str,
        joined: bool,
    ) -> BackendResult<()> {
        let room = self.resolve_room(room_id).await?;
        let users_count = self.store.online_count(room_id).await?;
        let users = self.store.standings(room_id).await?;

        let event = if joined {
            RoomEvent::UserJoin {
                room_id,
                username: username.to_string(),
                status_room: room.status,
                users_count,
                users,
            }
        } else {
            RoomEvent::UserLeave {
                room_id,
                username: username.to_string(),
                status_room: room.status,
                users_count,
                users,
            }
        };

        broadcast_to_room(&self.registry, self.membership.as_ref(), room_id, &event).await
    }

    async fn resolve_user(&self, telegram_id: i64) -> BackendResult<UserProfile> {
        self.users
            .resolve(telegram_id)
            .await?
            .ok_or(BackendError::UserNotFound(telegram_id))
    }

    async fn resolve_room(&self, room_id: i32) -> BackendResult<Room> {
        self.store
            .room(room_id)
            .await?
            .ok_or(BackendError::RoomNotFound(room_id))
    }
}
