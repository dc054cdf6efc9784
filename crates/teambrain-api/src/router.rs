//! Router configuration and server setup.

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::{ApiConfig, CorsPolicy};
use crate::handlers;
use crate::state::AppState;

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let allowed = match &config.cors {
        CorsPolicy::Any => return cors.allow_origin(Any),
        CorsPolicy::Only(origins) => origins,
    };

    let origins: Vec<HeaderValue> = allowed
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Health
        .route("/api/health", get(handlers::health))
        // Members
        .route("/api/users", post(handlers::register_member))
        .route("/api/me", get(handlers::profile))
        .route("/api/me/relay-key", put(handlers::set_relay_key))
        // Teams
        .route("/api/teams", post(handlers::create_team))
        .route("/api/join", post(handlers::join_team))
        .route("/api/teams/:team_id/members", get(handlers::list_members))
        .route(
            "/api/teams/:team_id/availability/find",
            post(handlers::find_availability),
        )
        .route("/api/teams/:team_id/book", post(handlers::book_meeting))
        // Calendar sync
        .route("/api/availability/sync", post(handlers::sync_availability))
        // Assistant
        .route("/api/classify", post(handlers::classify))
        .route("/api/chat", post(handlers::chat))
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::capture_entry),
        )
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}

/// Starts the API server.
pub async fn serve(config: ApiConfig, state: AppState) -> Result<(), std::io::Error> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);
    axum::serve(listener, create_router(state)).await
}
