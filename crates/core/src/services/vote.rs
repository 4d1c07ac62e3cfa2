//! Vote service: one vote per user per petition, updatable in place.

use marquee_common::{AppError, AppResult};
use marquee_db::{
    entities::vote::{self, VoteKind},
    repositories::{PetitionRepository, VoteRepository},
};
use sea_orm::Set;

/// Vote service for business logic.
#[derive(Clone)]
pub struct VoteService {
    vote_repo: VoteRepository,
    petition_repo: PetitionRepository,
}

/// What happened when a vote was cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The user's first vote on this petition.
    Created,
    /// The user had already voted; the vote now carries the new kind.
    Updated,
}

impl VoteService {
    /// Create a new vote service.
    #[must_use]
    pub const fn new(vote_repo: VoteRepository, petition_repo: PetitionRepository) -> Self {
        Self {
            vote_repo,
            petition_repo,
        }
    }

    /// Cast a vote on a petition. A user's repeat vote replaces their
    /// previous one rather than adding a second row.
    ///
    /// The vote table carries a unique index over `(petition_id, user_id)`,
    /// so two concurrent first votes cannot both insert; the loser's
    /// insert comes back as a conflict and is retried as an update.
    pub async fn vote(
        &self,
        petition_id: i64,
        user_id: i64,
        kind: VoteKind,
    ) -> AppResult<(vote::Model, VoteOutcome)> {
        self.petition_repo.get_by_id(petition_id).await?;

        if let Some(existing) = self
            .vote_repo
            .find_by_petition_and_user(petition_id, user_id)
            .await?
        {
            let updated = self.update_kind(existing, kind).await?;
            return Ok((updated, VoteOutcome::Updated));
        }

        let model = vote::ActiveModel {
            petition_id: Set(petition_id),
            user_id: Set(user_id),
            vote_type: Set(kind),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        match self.vote_repo.create(model).await {
            Ok(created) => Ok((created, VoteOutcome::Created)),
            Err(AppError::Conflict(_)) => {
                // Lost the race against a concurrent first vote.
                let existing = self
                    .vote_repo
                    .find_by_petition_and_user(petition_id, user_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::Internal("vote conflict with no existing row".to_string())
                    })?;
                let updated = self.update_kind(existing, kind).await?;
                Ok((updated, VoteOutcome::Updated))
            }
            Err(e) => Err(e),
        }
    }

    /// All votes on a petition (administrative path).
    pub async fn list_for_petition(&self, petition_id: i64) -> AppResult<Vec<vote::Model>> {
        self.petition_repo.get_by_id(petition_id).await?;
        self.vote_repo.find_by_petition(petition_id).await
    }

    /// Delete a single vote row (administrative path).
    pub async fn delete(&self, vote_id: i64) -> AppResult<()> {
        if self.vote_repo.find_by_id(vote_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Vote {vote_id} not found")));
        }
        self.vote_repo.delete(vote_id).await
    }

    async fn update_kind(&self, existing: vote::Model, kind: VoteKind) -> AppResult<vote::Model> {
        if existing.vote_type == kind {
            // Nothing to write; the stored vote already matches.
            return Ok(existing);
        }
        let mut active: vote::ActiveModel = existing.into();
        active.vote_type = Set(kind);
        self.vote_repo.update(active).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use marquee_db::entities::petition;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_petition(id: i64) -> petition::Model {
        petition::Model {
            id,
            movie_title: "Stalker".to_string(),
            movie_description: "Please stock this".to_string(),
            created_by: 1,
            created_at: Utc::now().into(),
            is_processed: false,
        }
    }

    fn create_test_vote(id: i64, petition_id: i64, user_id: i64, kind: VoteKind) -> vote::Model {
        vote::Model {
            id,
            petition_id,
            user_id,
            vote_type: kind,
            created_at: Utc::now().into(),
        }
    }

    fn service(vote_db: MockDatabase, petition_db: MockDatabase) -> VoteService {
        VoteService::new(
            VoteRepository::new(Arc::new(vote_db.into_connection())),
            PetitionRepository::new(Arc::new(petition_db.into_connection())),
        )
    }

    #[tokio::test]
    async fn test_vote_unknown_petition() {
        let vote_db = MockDatabase::new(DatabaseBackend::Postgres);
        let petition_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<petition::Model>::new()]);

        let result = service(vote_db, petition_db).vote(9, 1, VoteKind::Yes).await;
        assert!(matches!(result, Err(AppError::PetitionNotFound(9))));
    }

    #[tokio::test]
    async fn test_first_vote_is_created() {
        let saved = create_test_vote(1, 1, 1, VoteKind::Yes);
        let vote_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<vote::Model>::new(), vec![saved]]);
        let petition_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_petition(1)]]);

        let (vote, outcome) = service(vote_db, petition_db)
            .vote(1, 1, VoteKind::Yes)
            .await
            .unwrap();
        assert_eq!(outcome, VoteOutcome::Created);
        assert_eq!(vote.vote_type, VoteKind::Yes);
    }

    #[tokio::test]
    async fn test_repeat_vote_updates_kind() {
        let existing = create_test_vote(1, 1, 1, VoteKind::Yes);
        let updated = create_test_vote(1, 1, 1, VoteKind::No);
        let vote_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing], vec![updated]]);
        let petition_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_petition(1)]]);

        let (vote, outcome) = service(vote_db, petition_db)
            .vote(1, 1, VoteKind::No)
            .await
            .unwrap();
        assert_eq!(outcome, VoteOutcome::Updated);
        assert_eq!(vote.vote_type, VoteKind::No);
    }

    #[tokio::test]
    async fn test_same_kind_repeat_vote_skips_write() {
        // Only the lookup query is queued; an UPDATE would exhaust the mock.
        let existing = create_test_vote(1, 1, 1, VoteKind::Yes);
        let vote_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]]);
        let petition_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_petition(1)]]);

        let (vote, outcome) = service(vote_db, petition_db)
            .vote(1, 1, VoteKind::Yes)
            .await
            .unwrap();
        assert_eq!(outcome, VoteOutcome::Updated);
        assert_eq!(vote.vote_type, VoteKind::Yes);
    }

    #[tokio::test]
    async fn test_delete_unknown_vote() {
        let vote_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<vote::Model>::new()]);
        let petition_db = MockDatabase::new(DatabaseBackend::Postgres);

        let result = service(vote_db, petition_db).delete(3).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
