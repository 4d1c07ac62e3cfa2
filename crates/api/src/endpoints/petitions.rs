//! Petition and voting endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use marquee_common::{AppError, AppResult};
use marquee_core::{CreatePetitionInput, PetitionWithVotes, VoteOutcome};
use marquee_db::entities::{petition, vote::VoteKind};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::{ApiResponse, Notice},
};

/// Petition list entry with vote tallies.
#[derive(Serialize)]
pub struct PetitionResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub author: Option<String>,
    pub created_at: String,
    pub is_processed: bool,
    pub yes_count: u64,
    pub no_count: u64,
    pub total_count: u64,
    /// The viewer's own vote, when signed in and voted.
    pub viewer_vote: Option<VoteKind>,
}

impl From<PetitionWithVotes> for PetitionResponse {
    fn from(entry: PetitionWithVotes) -> Self {
        Self {
            id: entry.petition.id,
            title: entry.petition.movie_title,
            description: entry.petition.movie_description,
            author: entry.author.map(|u| u.username),
            created_at: entry.petition.created_at.to_rfc3339(),
            is_processed: entry.petition.is_processed,
            yes_count: entry.yes_votes,
            no_count: entry.no_votes,
            total_count: entry.total_votes,
            viewer_vote: entry.viewer_vote,
        }
    }
}

/// List all petitions, newest first.
async fn list_petitions(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<PetitionResponse>>> {
    let petitions = state
        .petition_service
        .list(viewer.map(|u| u.id))
        .await?;

    Ok(ApiResponse::ok(
        petitions.into_iter().map(PetitionResponse::from).collect(),
    ))
}

/// Create petition request.
#[derive(Debug, Deserialize)]
pub struct CreatePetitionRequest {
    pub movie_title: String,
    pub movie_description: String,
}

/// A newly created petition.
#[derive(Serialize)]
pub struct CreatedPetitionResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

impl From<petition::Model> for CreatedPetitionResponse {
    fn from(petition: petition::Model) -> Self {
        Self {
            id: petition.id,
            title: petition.movie_title,
            description: petition.movie_description,
            created_at: petition.created_at.to_rfc3339(),
        }
    }
}

/// Create a petition for a movie the store does not carry.
async fn create_petition(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePetitionRequest>,
) -> AppResult<ApiResponse<CreatedPetitionResponse>> {
    let petition = state
        .petition_service
        .create(
            user.id,
            CreatePetitionInput {
                movie_title: req.movie_title,
                movie_description: req.movie_description,
            },
        )
        .await?;

    let notice = Notice::success(format!(
        "Petition for \"{}\" has been created successfully!",
        petition.movie_title
    ));
    Ok(ApiResponse::ok(petition.into()).with_notice(notice))
}

/// Vote request.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub vote_type: String,
}

/// Vote response.
#[derive(Serialize)]
pub struct VoteResponse {
    pub petition_id: i64,
    pub vote_type: VoteKind,
}

/// Cast or change a vote on a petition.
async fn vote(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(petition_id): Path<i64>,
    Json(req): Json<VoteRequest>,
) -> AppResult<ApiResponse<VoteResponse>> {
    let kind = VoteKind::parse(&req.vote_type)
        .ok_or_else(|| AppError::Validation("Invalid vote type.".to_string()))?;

    let (vote, outcome) = state.vote_service.vote(petition_id, user.id, kind).await?;

    let notice = match outcome {
        VoteOutcome::Created => Notice::success(format!("Thank you for voting {kind}!")),
        VoteOutcome::Updated => Notice::info(format!("Your vote has been updated to {kind}.")),
    };

    Ok(ApiResponse::ok(VoteResponse {
        petition_id: vote.petition_id,
        vote_type: vote.vote_type,
    })
    .with_notice(notice))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_petitions).post(create_petition))
        .route("/{id}/vote", post(vote))
}
