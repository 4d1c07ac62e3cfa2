//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use marquee_core::{CatalogService, PetitionService, ReviewService, UserService, VoteService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub catalog_service: CatalogService,
    pub review_service: ReviewService,
    pub petition_service: PetitionService,
    pub vote_service: VoteService,
}

/// Authentication middleware.
///
/// Resolves a `Authorization: Bearer <token>` header to a user and stores
/// the model in request extensions for the extractors to pick up. An
/// invalid token is treated the same as none at all.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        if let Ok(user) = state.user_service.authenticate_by_token(token).await {
            req.extensions_mut().insert(user);
        }
    }

    next.run(req).await
}
