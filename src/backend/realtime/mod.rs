//! Real-time delivery: the connection registry and the WebSocket endpoint.

/// Live connection tracking and event fan-out
pub mod registry;

/// Duplex endpoint and per-connection tasks
pub mod socket;

pub use registry::{ConnectionHandle, ConnectionRegistry};
pub use socket::competition_socket;

use crate::backend::error::BackendResult;
use crate::backend::rooms::membership::MembershipIndex;
use crate::shared::RoomEvent;

/// Deliver an event to every online member of a room.
///
/// Membership comes from the index, delivery from the registry; the fan-out
/// itself is best-effort (see [`ConnectionRegistry::broadcast`]).
pub async fn broadcast_to_room(
    registry: &ConnectionRegistry,
    membership: &dyn MembershipIndex,
    room_id: i32,
    event: &RoomEvent,
) -> BackendResult<()> {
    let members = membership.users_in_room(room_id).await?;
    registry.broadcast(&members, event);
    Ok(())
}
