//! API endpoints.

mod admin;
mod auth;
mod movies;
mod petitions;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/movies", movies::router())
        .nest("/petitions", petitions::router())
        .nest("/admin", admin::router())
}
