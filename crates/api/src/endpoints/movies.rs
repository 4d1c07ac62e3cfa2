//! Movie catalog endpoints, with review management nested under each movie.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use marquee_common::AppResult;
use marquee_db::entities::{movie, review, user};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Catalog list item.
#[derive(Serialize)]
pub struct MovieListItem {
    pub id: i64,
    pub name: String,
    pub price: i32,
    pub image: String,
    pub available: bool,
}

impl From<movie::Model> for MovieListItem {
    fn from(movie: movie::Model) -> Self {
        let available = movie.is_available();
        Self {
            id: movie.id,
            name: movie.name,
            price: movie.price,
            image: movie.image,
            available,
        }
    }
}

/// Movie detail, including its reviews.
#[derive(Serialize)]
pub struct MovieDetailResponse {
    pub id: i64,
    pub name: String,
    pub price: i32,
    pub description: String,
    pub image: String,
    pub amount_left: Option<i32>,
    pub available: bool,
    pub reviews: Vec<ReviewResponse>,
}

/// A review with its author's username.
#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub comment: String,
    pub author: Option<String>,
    pub date: String,
}

impl From<(review::Model, Option<user::Model>)> for ReviewResponse {
    fn from((review, author): (review::Model, Option<user::Model>)) -> Self {
        Self {
            id: review.id,
            comment: review.comment,
            author: author.map(|u| u.username),
            date: review.created_at.to_rfc3339(),
        }
    }
}

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct ListMoviesQuery {
    pub search: Option<String>,
}

/// List available movies, optionally filtered by name.
async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<ListMoviesQuery>,
) -> AppResult<ApiResponse<Vec<MovieListItem>>> {
    let movies = state
        .catalog_service
        .list(query.search.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        movies.into_iter().map(MovieListItem::from).collect(),
    ))
}

/// Get a movie with its reviews.
async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<MovieDetailResponse>> {
    let detail = state.catalog_service.get(id).await?;
    let movie = detail.movie;
    let available = movie.is_available();

    Ok(ApiResponse::ok(MovieDetailResponse {
        id: movie.id,
        name: movie.name,
        price: movie.price,
        description: movie.description,
        image: movie.image,
        amount_left: movie.amount_left,
        available,
        reviews: detail.reviews.into_iter().map(ReviewResponse::from).collect(),
    }))
}

/// Review request body, shared by create and edit.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub comment: String,
}

/// Created/updated review, without the author join.
#[derive(Serialize)]
pub struct OwnReviewResponse {
    pub id: i64,
    pub comment: String,
    pub movie_id: i64,
    pub date: String,
}

impl From<review::Model> for OwnReviewResponse {
    fn from(review: review::Model) -> Self {
        Self {
            id: review.id,
            comment: review.comment,
            movie_id: review.movie_id,
            date: review.created_at.to_rfc3339(),
        }
    }
}

/// Create a review on a movie.
async fn create_review(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<ApiResponse<OwnReviewResponse>> {
    let review = state
        .review_service
        .create(movie_id, user.id, &req.comment)
        .await?;

    Ok(ApiResponse::ok(review.into()))
}

/// Fetch the caller's own review, for pre-filling the edit form.
async fn get_review(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path((_movie_id, review_id)): Path<(i64, i64)>,
) -> AppResult<ApiResponse<OwnReviewResponse>> {
    let review = state.review_service.get_owned(review_id, user.id).await?;

    Ok(ApiResponse::ok(review.into()))
}

/// Update the caller's own review.
async fn update_review(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path((_movie_id, review_id)): Path<(i64, i64)>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<ApiResponse<OwnReviewResponse>> {
    let review = state
        .review_service
        .edit(review_id, user.id, &req.comment)
        .await?;

    Ok(ApiResponse::ok(review.into()))
}

/// Delete the caller's own review.
async fn delete_review(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path((_movie_id, review_id)): Path<(i64, i64)>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.review_service.delete(review_id, user.id).await?;

    Ok(response::ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies))
        .route("/{id}", get(get_movie))
        .route("/{id}/reviews", post(create_review))
        .route(
            "/{id}/reviews/{review_id}",
            get(get_review).put(update_review).delete(delete_review),
        )
}
