/**
 * Connection Registry
 *
 * Tracks the live duplex connection for every registered user and delivers
 * serialized room events to one user, a set of users, or everyone.
 *
 * # Delivery Contract
 *
 * Delivery is best-effort and at-most-once. Sending to a user without a
 * handle is a silent no-op; a fan-out never fails because one recipient's
 * connection is gone, and no ordering is guaranteed across recipients.
 *
 * A handle here is the mpsc sender feeding a connection's writer task, so a
 * send is a channel handoff, not a network write. The send only fails when
 * the writer task is gone, in which case the stale handle is evicted on the
 * spot; the presence cleanup still runs on the explicit disconnect path.
 *
 * # Sharing
 *
 * The registry is process-local. It is constructed once at startup and
 * handed by clone (shared ownership) to every component that broadcasts;
 * never reached through globals.
 */
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::ws::Message;
use tokio::sync::mpsc;

use crate::shared::RoomEvent;

/// Sender half of a connection's outbound channel.
pub type ConnectionHandle = mpsc::UnboundedSender<Message>;

/// Live map from telegram id to connection handle.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<Mutex<HashMap<i64, ConnectionHandle>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the handle for a user, replacing any previous one.
    ///
    /// A superseded handle is not closed; its writer task ends when the old
    /// transport does.
    pub fn register(&self, telegram_id: i64, handle: ConnectionHandle) {
        self.connections.lock().unwrap().insert(telegram_id, handle);
        tracing::debug!(telegram_id, "connection registered");
    }

    /// Drop the handle for a user; no-op if absent.
    pub fn unregister(&self, telegram_id: i64) {
        self.connections.lock().unwrap().remove(&telegram_id);
        tracing::debug!(telegram_id, "connection unregistered");
    }

    /// Whether a user currently has a registered handle.
    pub fn is_connected(&self, telegram_id: i64) -> bool {
        self.connections.lock().unwrap().contains_key(&telegram_id)
    }

    /// Send an event to one user, best-effort.
    pub fn send_to(&self, telegram_id: i64, event: &RoomEvent) {
        let Some(text) = serialize_event(event) else {
            return;
        };
        self.deliver(&mut self.connections.lock().unwrap(), telegram_id, &text);
    }

    /// Fan an event out to the given users.
    ///
    /// The event is serialized once; individual failed sends evict the dead
    /// handle and never abort the loop.
    pub fn broadcast(&self, telegram_ids: &[i64], event: &RoomEvent) {
        let Some(text) = serialize_event(event) else {
            return;
        };
        let mut connections = self.connections.lock().unwrap();
        for &telegram_id in telegram_ids {
            self.deliver(&mut connections, telegram_id, &text);
        }
    }

    /// Send an event to every registered connection, regardless of room.
    pub fn broadcast_all(&self, event: &RoomEvent) {
        let Some(text) = serialize_event(event) else {
            return;
        };
        let mut connections = self.connections.lock().unwrap();
        connections.retain(|telegram_id, handle| {
            let alive = handle.send(Message::Text(text.clone().into())).is_ok();
            if !alive {
                tracing::debug!(telegram_id, "evicting stale connection handle");
            }
            alive
        });
    }

    fn deliver(&self, connections: &mut HashMap<i64, ConnectionHandle>, telegram_id: i64, text: &str) {
        let stale = match connections.get(&telegram_id) {
            Some(handle) => handle.send(Message::Text(text.to_string().into())).is_err(),
            None => false,
        };
        if stale {
            connections.remove(&telegram_id);
            tracing::debug!(telegram_id, "evicting stale connection handle");
        }
    }
}

fn serialize_event(event: &RoomEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!("failed to serialize room event: {e}");
            None
        }
    }
}
