//! Review repository.

use std::sync::Arc;

use crate::entities::{review, user, Review};
use marquee_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

/// Review repository for database operations.
#[derive(Clone)]
pub struct ReviewRepository {
    db: Arc<DatabaseConnection>,
}

impl ReviewRepository {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a review by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<review::Model>> {
        Review::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a review by ID scoped to its owner.
    ///
    /// A non-owner's lookup finds nothing, so callers cannot distinguish
    /// "someone else's review" from "no such review".
    pub async fn find_by_id_and_user(
        &self,
        id: i64,
        user_id: i64,
    ) -> AppResult<Option<review::Model>> {
        Review::find_by_id(id)
            .filter(review::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all reviews for a movie, with their authors.
    pub async fn find_by_movie_with_authors(
        &self,
        movie_id: i64,
    ) -> AppResult<Vec<(review::Model, Option<user::Model>)>> {
        Review::find()
            .filter(review::Column::MovieId.eq(movie_id))
            .order_by_asc(review::Column::Id)
            .find_also_related(user::Entity)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new review.
    pub async fn create(&self, model: review::ActiveModel) -> AppResult<review::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a review.
    pub async fn update(&self, model: review::ActiveModel) -> AppResult<review::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a review.
    pub async fn delete(&self, model: review::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
