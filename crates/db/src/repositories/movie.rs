//! Movie repository.

use std::sync::Arc;

use crate::entities::{movie, Movie};
use marquee_common::{AppError, AppResult};
use sea_orm::{
    sea_query::{extension::postgres::PgExpr, Expr},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

/// Movie repository for database operations.
#[derive(Clone)]
pub struct MovieRepository {
    db: Arc<DatabaseConnection>,
}

impl MovieRepository {
    /// Create a new movie repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a movie by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<movie::Model>> {
        Movie::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a movie by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<movie::Model> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::MovieNotFound(id))
    }

    /// Find movies for the catalog listing.
    ///
    /// Applies an optional case-insensitive substring match on the name,
    /// then excludes movies whose stock is exactly zero. A NULL stock count
    /// means unlimited availability and is always included.
    pub async fn find_available(&self, search: Option<&str>) -> AppResult<Vec<movie::Model>> {
        let mut query = Movie::find();

        if let Some(term) = search {
            query = query
                .filter(Expr::col(movie::Column::Name).ilike(format!("%{}%", escape_like(term))));
        }

        query
            .filter(
                Condition::any()
                    .add(movie::Column::AmountLeft.is_null())
                    .add(movie::Column::AmountLeft.gt(0)),
            )
            .order_by_asc(movie::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new movie.
    pub async fn create(&self, model: movie::ActiveModel) -> AppResult<movie::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a movie.
    pub async fn update(&self, model: movie::ActiveModel) -> AppResult<movie::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a movie. Cascades to its reviews.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        Movie::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

/// Escape LIKE metacharacters in a user-supplied search term.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_passthrough() {
        assert_eq!(escape_like("dune"), "dune");
    }

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("100%_\\"), "100\\%\\_\\\\");
    }
}
