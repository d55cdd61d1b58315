use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::SharedState;

/// Build the Axum router with all routes and middleware.
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check (outside /api prefix)
        .route("/health", get(handlers::health))
        // Game CRUD
        .route(
            "/api/games",
            post(handlers::create_game).get(handlers::list_games),
        )
        .route(
            "/api/games/{id}",
            get(handlers::get_game).delete(handlers::delete_game),
        )
        // Move submission
        .route("/api/games/{id}/moves", post(handlers::submit_move))
        // Queries
        .route("/api/games/{id}/squares/{square}", get(handlers::get_square))
        .route("/api/games/{id}/board", get(handlers::render_board))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
