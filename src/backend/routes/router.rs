/**
 * Router Configuration
 *
 * Assembles the application router: competition routes, a permissive CORS
 * layer (clients are Telegram web views served from another origin), and a
 * 404 fallback.
 */
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::backend::routes::competition_routes::configure_competition_routes;
use crate::backend::server::state::AppState;

/// Create the axum router with all routes configured.
pub fn create_router(state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_competition_routes(router);

    router
        .layer(CorsLayer::permissive())
        .fallback(|| async { "404 Not Found" })
        .with_state(state)
}
