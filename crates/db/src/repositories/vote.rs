//! Vote repository.

use std::sync::Arc;

use crate::entities::{vote, Vote};
use marquee_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, SqlErr,
};

/// Vote repository for database operations.
#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
}

impl VoteRepository {
    /// Create a new vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a vote by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<vote::Model>> {
        Vote::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the vote a user has cast on a petition, if any.
    pub async fn find_by_petition_and_user(
        &self,
        petition_id: i64,
        user_id: i64,
    ) -> AppResult<Option<vote::Model>> {
        Vote::find()
            .filter(vote::Column::PetitionId.eq(petition_id))
            .filter(vote::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all votes on a petition.
    pub async fn find_by_petition(&self, petition_id: i64) -> AppResult<Vec<vote::Model>> {
        Vote::find()
            .filter(vote::Column::PetitionId.eq(petition_id))
            .order_by_asc(vote::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new vote.
    ///
    /// The table carries a unique index on (petition_id, user_id); a
    /// concurrent duplicate insert surfaces as [`AppError::Conflict`] so the
    /// caller can retry the write as an update.
    pub async fn create(&self, model: vote::ActiveModel) -> AppResult<vote::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("Vote already exists for this petition and user".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Update a vote.
    pub async fn update(&self, model: vote::ActiveModel) -> AppResult<vote::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a vote.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        Vote::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
