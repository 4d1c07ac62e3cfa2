//! Petition repository.

use std::sync::Arc;

use crate::entities::{petition, user, Petition};
use marquee_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder,
};

/// Petition repository for database operations.
#[derive(Clone)]
pub struct PetitionRepository {
    db: Arc<DatabaseConnection>,
}

impl PetitionRepository {
    /// Create a new petition repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a petition by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<petition::Model>> {
        Petition::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a petition by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<petition::Model> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::PetitionNotFound(id))
    }

    /// Find all petitions, newest first, with their authors.
    pub async fn find_all_with_authors(
        &self,
    ) -> AppResult<Vec<(petition::Model, Option<user::Model>)>> {
        Petition::find()
            .order_by_desc(petition::Column::CreatedAt)
            .find_also_related(user::Entity)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new petition.
    pub async fn create(&self, model: petition::ActiveModel) -> AppResult<petition::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a petition.
    pub async fn update(&self, model: petition::ActiveModel) -> AppResult<petition::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a petition. Cascades to its votes.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        Petition::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
