/**
 * Server Initialization
 *
 * Wires the application together: one connection registry, one membership
 * index, the PostgreSQL collaborator implementations, and the service
 * objects built on top of them, all handed to the router as shared state.
 *
 * # Initialization Steps
 *
 * 1. Construct the connection registry (process lifetime, single owner)
 * 2. Construct the membership index
 * 3. Build the PostgreSQL store, user directory, and question provider
 * 4. Assemble the lifecycle manager and the competition orchestrator
 * 5. Create the router with the combined state
 */
use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::backend::competition::{CompetitionOrchestrator, ScoreLedger};
use crate::backend::quiz::{PgQuestionProvider, QuestionProvider};
use crate::backend::realtime::ConnectionRegistry;
use crate::backend::rooms::membership::{MembershipIndex, MemoryMembershipIndex};
use crate::backend::rooms::store::RoomStore;
use crate::backend::rooms::{PgRoomStore, RoomLifecycle};
use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;
use crate::backend::users::{PgUserDirectory, UserDirectory};

/// Build the application state from a live database pool.
pub fn build_state(pool: PgPool) -> AppState {
    let registry = ConnectionRegistry::new();
    let membership: Arc<dyn MembershipIndex> = Arc::new(MemoryMembershipIndex::new());

    let store: Arc<dyn RoomStore> = Arc::new(PgRoomStore::new(pool.clone()));
    let users: Arc<dyn UserDirectory> = Arc::new(PgUserDirectory::new(pool.clone()));
    let questions: Arc<dyn QuestionProvider> = Arc::new(PgQuestionProvider::new(pool));

    let lifecycle = Arc::new(RoomLifecycle::new(
        store.clone(),
        users.clone(),
        membership.clone(),
        registry.clone(),
    ));
    let orchestrator = Arc::new(CompetitionOrchestrator::new(
        store.clone(),
        users,
        membership.clone(),
        questions,
        ScoreLedger::new(store),
        registry.clone(),
    ));

    AppState {
        registry,
        membership,
        lifecycle,
        orchestrator,
    }
}

/// Create the axum application.
pub async fn create_app(pool: PgPool) -> Router<()> {
    tracing::info!("Initializing competition backend server");

    let state = build_state(pool);
    let app = create_router(state);

    tracing::info!("Router configured");
    app
}
