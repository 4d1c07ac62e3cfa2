//! Petition service: requesting movies the store does not carry yet.

use marquee_common::{AppError, AppResult};
use marquee_db::{
    entities::{petition, user, vote::VoteKind},
    repositories::{PetitionRepository, VoteRepository},
};
use sea_orm::Set;

/// Petition service for business logic.
#[derive(Clone)]
pub struct PetitionService {
    petition_repo: PetitionRepository,
    vote_repo: VoteRepository,
}

/// Input for creating a petition.
#[derive(Debug)]
pub struct CreatePetitionInput {
    pub movie_title: String,
    pub movie_description: String,
}

/// A petition enriched with its author, vote tallies, and the viewer's
/// own vote when they have one.
pub struct PetitionWithVotes {
    pub petition: petition::Model,
    pub author: Option<user::Model>,
    pub yes_votes: u64,
    pub no_votes: u64,
    pub total_votes: u64,
    pub viewer_vote: Option<VoteKind>,
}

impl PetitionService {
    /// Create a new petition service.
    #[must_use]
    pub const fn new(petition_repo: PetitionRepository, vote_repo: VoteRepository) -> Self {
        Self {
            petition_repo,
            vote_repo,
        }
    }

    /// Create a petition. Both the title and the description are
    /// required after trimming surrounding whitespace.
    pub async fn create(
        &self,
        user_id: i64,
        input: CreatePetitionInput,
    ) -> AppResult<petition::Model> {
        let title = input.movie_title.trim();
        let description = input.movie_description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(AppError::Validation(
                "Please fill in all required fields.".to_string(),
            ));
        }

        let model = petition::ActiveModel {
            movie_title: Set(title.to_string()),
            movie_description: Set(description.to_string()),
            created_by: Set(user_id),
            created_at: Set(chrono::Utc::now().into()),
            is_processed: Set(false),
            ..Default::default()
        };

        self.petition_repo.create(model).await
    }

    /// Get a single petition by id.
    pub async fn get(&self, id: i64) -> AppResult<petition::Model> {
        self.petition_repo.get_by_id(id).await
    }

    /// List all petitions, newest first, with vote tallies. When a
    /// viewer is given, each entry also carries that viewer's vote.
    pub async fn list(&self, viewer: Option<i64>) -> AppResult<Vec<PetitionWithVotes>> {
        let petitions = self.petition_repo.find_all_with_authors().await?;

        let mut out = Vec::with_capacity(petitions.len());
        for (petition, author) in petitions {
            let votes = self.vote_repo.find_by_petition(petition.id).await?;

            let yes_votes = votes
                .iter()
                .filter(|v| v.vote_type == VoteKind::Yes)
                .count() as u64;
            let total_votes = votes.len() as u64;
            let viewer_vote = viewer.and_then(|uid| {
                votes
                    .iter()
                    .find(|v| v.user_id == uid)
                    .map(|v| v.vote_type)
            });

            out.push(PetitionWithVotes {
                petition,
                author,
                yes_votes,
                no_votes: total_votes - yes_votes,
                total_votes,
                viewer_vote,
            });
        }

        Ok(out)
    }

    /// Mark a petition as processed or not (administrative path).
    pub async fn set_processed(&self, id: i64, processed: bool) -> AppResult<petition::Model> {
        let petition = self.petition_repo.get_by_id(id).await?;

        let mut active: petition::ActiveModel = petition.into();
        active.is_processed = Set(processed);

        self.petition_repo.update(active).await
    }

    /// Delete a petition (administrative path). Cascades to its votes.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.petition_repo.get_by_id(id).await?;
        self.petition_repo.delete(id).await
    }
}
