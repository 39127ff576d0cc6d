/**
 * Competition Route Table
 *
 * Route configuration for the competition surface:
 *
 * - `GET  /competitions/ws` - duplex endpoint (register + event push)
 * - `GET  /competitions/rooms` - lobby listing with online counts
 * - `POST /competitions/create-room` - create a room
 * - `POST /competitions/join-room` - join a room
 * - `PATCH /competitions/leave-room` - leave a room
 * - `GET  /competitions/start` - start a round
 * - `PATCH /competitions/check_answer` - submit an answer
 */
use axum::Router;

use crate::backend::competition::handlers::{check_answer, start_round};
use crate::backend::realtime::competition_socket;
use crate::backend::rooms::handlers::{create_room, join_room, leave_room, list_rooms};
use crate::backend::server::state::AppState;

/// Configure competition routes.
pub fn configure_competition_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/competitions/ws",
            axum::routing::get(competition_socket),
        )
        .route(
            "/competitions/rooms",
            axum::routing::get(list_rooms),
        )
        .route(
            "/competitions/create-room",
            axum::routing::post(create_room),
        )
        .route(
            "/competitions/join-room",
            axum::routing::post(join_room),
        )
        .route(
            "/competitions/leave-room",
            axum::routing::patch(leave_room),
        )
        .route(
            "/competitions/start",
            axum::routing::get(start_round),
        )
        .route(
            "/competitions/check_answer",
            axum::routing::patch(check_answer),
        )
}
