//! Administrative endpoints: movie management, petition processing, and
//! vote moderation. Every route requires an administrator account.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use marquee_common::AppResult;
use marquee_core::{admin::MovieAdmin, CreateMovieInput, UpdateMovieInput};
use marquee_db::entities::{movie, vote};
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::{movies::ReviewResponse, petitions::PetitionResponse},
    extractors::AdminUser,
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Full movie record as seen by the administrative interface.
#[derive(Serialize)]
pub struct AdminMovieResponse {
    pub id: i64,
    pub name: String,
    pub price: i32,
    pub description: String,
    pub image: String,
    pub amount_left: Option<i32>,
    pub created_at: String,
}

impl From<movie::Model> for AdminMovieResponse {
    fn from(movie: movie::Model) -> Self {
        Self {
            id: movie.id,
            name: movie.name,
            price: movie.price,
            description: movie.description,
            image: movie.image,
            amount_left: movie.amount_left,
            created_at: movie.created_at.to_rfc3339(),
        }
    }
}

/// Movie form body, shared by create and edit.
#[derive(Debug, Deserialize)]
pub struct MovieRequest {
    pub name: String,
    pub price: i32,
    pub description: String,
    pub image: String,
    pub amount_left: Option<i32>,
}

/// Create a movie.
async fn create_movie(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<MovieRequest>,
) -> AppResult<ApiResponse<AdminMovieResponse>> {
    let movie = state
        .catalog_service
        .create_movie(CreateMovieInput {
            name: req.name,
            price: req.price,
            description: req.description,
            image: req.image,
            amount_left: req.amount_left,
        })
        .await?;

    Ok(ApiResponse::ok(movie.into()))
}

/// Edit a movie. The stock-lock rule applies: once `amount_left` has
/// reached zero it can no longer be changed.
async fn update_movie(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<MovieRequest>,
) -> AppResult<ApiResponse<AdminMovieResponse>> {
    let movie = state
        .catalog_service
        .edit_movie(
            id,
            UpdateMovieInput {
                name: req.name,
                price: req.price,
                description: req.description,
                image: req.image,
                amount_left: req.amount_left,
            },
        )
        .await?;

    Ok(ApiResponse::ok(movie.into()))
}

/// Delete a movie and, through the cascade, its reviews.
async fn delete_movie(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.catalog_service.delete_movie(id).await?;

    Ok(response::ok())
}

/// One field of the movie edit form.
#[derive(Serialize)]
pub struct FormFieldResponse {
    pub name: &'static str,
    pub required: bool,
    pub read_only: bool,
}

/// Movie form descriptor.
#[derive(Serialize)]
pub struct MovieFormResponse {
    pub movie: AdminMovieResponse,
    pub fields: Vec<FormFieldResponse>,
}

/// Describe the edit form for a movie, marking per-field read-only
/// state for the current stored record.
async fn movie_form(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<MovieFormResponse>> {
    let detail = state.catalog_service.get(id).await?;
    let read_only = MovieAdmin::read_only_fields(&detail.movie);

    let fields = MovieAdmin::FIELDS
        .iter()
        .map(|f| FormFieldResponse {
            name: f.name,
            required: f.required,
            read_only: read_only.contains(&f.name),
        })
        .collect();

    Ok(ApiResponse::ok(MovieFormResponse {
        movie: detail.movie.into(),
        fields,
    }))
}

/// List a movie's reviews, whoever wrote them.
async fn list_movie_reviews(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Vec<ReviewResponse>>> {
    let reviews = state.review_service.list_for_movie(id).await?;

    Ok(ApiResponse::ok(
        reviews.into_iter().map(ReviewResponse::from).collect(),
    ))
}

/// Delete any review, without the owner scope regular deletes go
/// through.
async fn delete_review(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.review_service.delete_any(id).await?;

    Ok(response::ok())
}

/// List all petitions with their vote tallies.
async fn list_petitions(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<PetitionResponse>>> {
    let petitions = state.petition_service.list(None).await?;

    Ok(ApiResponse::ok(
        petitions.into_iter().map(PetitionResponse::from).collect(),
    ))
}

/// Processed-flag request.
#[derive(Debug, Deserialize)]
pub struct SetProcessedRequest {
    pub is_processed: bool,
}

/// Processed-flag response.
#[derive(Serialize)]
pub struct SetProcessedResponse {
    pub id: i64,
    pub is_processed: bool,
}

/// Mark a petition as processed or not.
async fn set_petition_processed(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<SetProcessedRequest>,
) -> AppResult<ApiResponse<SetProcessedResponse>> {
    let petition = state
        .petition_service
        .set_processed(id, req.is_processed)
        .await?;

    Ok(ApiResponse::ok(SetProcessedResponse {
        id: petition.id,
        is_processed: petition.is_processed,
    }))
}

/// Delete a petition and, through the cascade, its votes.
async fn delete_petition(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.petition_service.delete(id).await?;

    Ok(response::ok())
}

/// A single vote row.
#[derive(Serialize)]
pub struct AdminVoteResponse {
    pub id: i64,
    pub petition_id: i64,
    pub user_id: i64,
    pub vote_type: vote::VoteKind,
    pub created_at: String,
}

impl From<vote::Model> for AdminVoteResponse {
    fn from(vote: vote::Model) -> Self {
        Self {
            id: vote.id,
            petition_id: vote.petition_id,
            user_id: vote.user_id,
            vote_type: vote.vote_type,
            created_at: vote.created_at.to_rfc3339(),
        }
    }
}

/// List the votes on a petition.
async fn list_petition_votes(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Vec<AdminVoteResponse>>> {
    let votes = state.vote_service.list_for_petition(id).await?;

    Ok(ApiResponse::ok(
        votes.into_iter().map(AdminVoteResponse::from).collect(),
    ))
}

/// Delete a single vote row.
async fn delete_vote(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.vote_service.delete(id).await?;

    Ok(response::ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies", post(create_movie))
        .route("/movies/{id}", put(update_movie).delete(delete_movie))
        .route("/movies/{id}/form", get(movie_form))
        .route("/movies/{id}/reviews", get(list_movie_reviews))
        .route("/reviews/{id}", delete(delete_review))
        .route("/petitions", get(list_petitions))
        .route("/petitions/{id}/processed", put(set_petition_processed))
        .route("/petitions/{id}", delete(delete_petition))
        .route("/petitions/{id}/votes", get(list_petition_votes))
        .route("/votes/{id}", delete(delete_vote))
}
