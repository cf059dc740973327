use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    AppState, checkout, create_book, create_member, list_books, list_members, return_book, root,
};

/// Creates the API router with all circulation endpoints
///
/// - GET/POST /books
/// - GET/POST /members
/// - POST /checkout
/// - POST /return
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/books", get(list_books).post(create_book))
        .route("/members", get(list_members).post(create_member))
        .route("/checkout", post(checkout))
        .route("/return", post(return_book))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // The scanner front end is served from another origin
        .layer(CorsLayer::very_permissive())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
