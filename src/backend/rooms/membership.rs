/**
 * Room Membership Index
 *
 * The authoritative record of which online users are in which room, with a
 * reverse pointer from user to current room. This is the one piece of state
 * meant to be shared across server processes, so the interface is
 * restricted to single-command operations that the backing store applies
 * atomically; no read-modify-write ever crosses this boundary.
 *
 * Only ids live here. Connection handles are process-local and stay in the
 * connection registry.
 *
 * The in-memory implementation below serves single-process deployments and
 * tests; a shared key/value store slots in behind the same trait for
 * horizontal scaling.
 */
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::error::BackendResult;

/// Cross-process record of room membership.
#[async_trait]
pub trait MembershipIndex: Send + Sync {
    /// Insert a user into a room's member set and record the reverse
    /// pointer. A user is in at most one room: inserting into a new room
    /// atomically retires any previous membership. Idempotent.
    async fn add_user_to_room(&self, telegram_id: i64, room_id: i32) -> BackendResult<()>;

    /// Remove a user's membership. When `room_id` is `None` the current
    /// room is resolved through the reverse pointer first; a user with no
    /// recorded room is a no-op.
    async fn remove_user_from_room(
        &self,
        telegram_id: i64,
        room_id: Option<i32>,
    ) -> BackendResult<()>;

    /// Member set of a room; order is unspecified.
    async fn users_in_room(&self, room_id: i32) -> BackendResult<Vec<i64>>;

    /// The room a user currently occupies, if any.
    async fn room_of_user(&self, telegram_id: i64) -> BackendResult<Option<i32>>;

    async fn count_users_in_room(&self, room_id: i32) -> BackendResult<i64>;
}

#[derive(Default)]
struct Inner {
    rooms: HashMap<i32, HashSet<i64>>,
    user_rooms: HashMap<i64, i32>,
}

/// Process-local membership index. One lock guards both maps, so every
/// operation is atomic with respect to concurrent callers.
#[derive(Default)]
pub struct MemoryMembershipIndex {
    inner: Mutex<Inner>,
}

impl MemoryMembershipIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MembershipIndex for MemoryMembershipIndex {
    async fn add_user_to_room(&self, telegram_id: i64, room_id: i32) -> BackendResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(previous) = inner.user_rooms.insert(telegram_id, room_id) {
            if previous != room_id {
                if let Some(members) = inner.rooms.get_mut(&previous) {
                    members.remove(&telegram_id);
                    if members.is_empty() {
                        inner.rooms.remove(&previous);
                    }
                }
            }
        }
        inner.rooms.entry(room_id).or_default().insert(telegram_id);
        Ok(())
    }

    async fn remove_user_from_room(
        &self,
        telegram_id: i64,
        room_id: Option<i32>,
    ) -> BackendResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let room_id = match room_id.or_else(|| inner.user_rooms.get(&telegram_id).copied()) {
            Some(room_id) => room_id,
            None => return Ok(()),
        };

        if let Some(members) = inner.rooms.get_mut(&room_id) {
            members.remove(&telegram_id);
            if members.is_empty() {
                inner.rooms.remove(&room_id);
            }
        }
        // A user who already moved on keeps their newer pointer.
        if inner.user_rooms.get(&telegram_id) == Some(&room_id) {
            inner.user_rooms.remove(&telegram_id);
        }
        Ok(())
    }

    async fn users_in_room(&self, room_id: i32) -> BackendResult<Vec<i64>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rooms
            .get(&room_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn room_of_user(&self, telegram_id: i64) -> BackendResult<Option<i32>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.user_rooms.get(&telegram_id).copied())
    }

    async fn count_users_in_room(&self, room_id: i32) -> BackendResult<i64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rooms.get(&room_id).map(|members| members.len() as i64).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let index = MemoryMembershipIndex::new();
        index.add_user_to_room(100, 1).await.unwrap();
        index.add_user_to_room(100, 1).await.unwrap();

        assert_eq!(index.users_in_room(1).await.unwrap(), vec![100]);
        assert_eq!(index.count_users_in_room(1).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_user_is_in_at_most_one_room() {
        let index = MemoryMembershipIndex::new();
        index.add_user_to_room(100, 1).await.unwrap();
        index.add_user_to_room(100, 2).await.unwrap();

        assert!(index.users_in_room(1).await.unwrap().is_empty());
        assert_eq!(index.users_in_room(2).await.unwrap(), vec![100]);
        assert_eq!(index.room_of_user(100).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_remove_resolves_room_via_reverse_pointer() {
        let index = MemoryMembershipIndex::new();
        index.add_user_to_room(100, 1).await.unwrap();
        index.remove_user_from_room(100, None).await.unwrap();

        assert!(index.users_in_room(1).await.unwrap().is_empty());
        assert_eq!(index.room_of_user(100).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_without_membership_is_noop() {
        let index = MemoryMembershipIndex::new();
        index.remove_user_from_room(100, None).await.unwrap();
        index.remove_user_from_room(100, Some(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_for_stale_room_keeps_newer_pointer() {
        let index = MemoryMembershipIndex::new();
        index.add_user_to_room(100, 1).await.unwrap();
        index.add_user_to_room(100, 2).await.unwrap();

        // A late removal against the old room must not clobber room 2.
        index.remove_user_from_room(100, Some(1)).await.unwrap();
        assert_eq!(index.room_of_user(100).await.unwrap(), Some(2));
        assert_eq!(index.users_in_room(2).await.unwrap(), vec![100]);
    }

    #[tokio::test]
    async fn test_counts_track_distinct_members() {
        let index = MemoryMembershipIndex::new();
        index.add_user_to_room(100, 1).await.unwrap();
        index.add_user_to_room(200, 1).await.unwrap();
        index.add_user_to_room(100, 1).await.unwrap();

        assert_eq!(index.count_users_in_room(1).await.unwrap(), 2);
        let mut members = index.users_in_room(1).await.unwrap();
        members.sort_unstable();
        assert_eq!(members, vec![100, 200]);
    }
}
