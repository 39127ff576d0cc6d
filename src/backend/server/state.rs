/**
 * Application State
 *
 * Central state container for the axum application. Every component is an
 * injected service object constructed once at startup: the connection
 * registry and membership index are shared by the lifecycle manager and
 * the orchestrator, never reached through globals.
 *
 * `FromRef` implementations let handlers extract just the piece they use
 * instead of the whole state.
 */
use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::competition::CompetitionOrchestrator;
use crate::backend::realtime::ConnectionRegistry;
use crate::backend::rooms::membership::MembershipIndex;
use crate::backend::rooms::RoomLifecycle;

#[derive(Clone)]
pub struct AppState {
    /// Live connection handles, shared by everything that broadcasts.
    pub registry: ConnectionRegistry,

    /// Who is online in which room; the cross-process resource.
    pub membership: Arc<dyn MembershipIndex>,

    /// Room creation, join/leave, status machine.
    pub lifecycle: Arc<RoomLifecycle>,

    /// The live quiz loop.
    pub orchestrator: Arc<CompetitionOrchestrator>,
}

impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.registry.clone()
    }
}

impl FromRef<AppState> for Arc<RoomLifecycle> {
    fn from_ref(state: &AppState) -> Self {
        state.lifecycle.clone()
    }
}

impl FromRef<AppState> for Arc<CompetitionOrchestrator> {
    fn from_ref(state: &AppState) -> Self {
        state.orchestrator.clone()
    }
}
