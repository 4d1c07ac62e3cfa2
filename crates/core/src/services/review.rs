//! Review service: creating, editing and deleting reviews on movies.
//!
//! Edits and deletes are scoped to the review's author. A review another
//! user owns is reported as not found, never as forbidden, so the
//! endpoint does not leak which ids exist. Moderation goes through
//! [`ReviewService::delete_any`], which skips the owner scope.

use marquee_common::{AppError, AppResult};
use marquee_db::{
    entities::{review, user},
    repositories::{MovieRepository, ReviewRepository},
};
use sea_orm::Set;

/// Review service for business logic.
#[derive(Clone)]
pub struct ReviewService {
    review_repo: ReviewRepository,
    movie_repo: MovieRepository,
}

impl ReviewService {
    /// Create a new review service.
    #[must_use]
    pub const fn new(review_repo: ReviewRepository, movie_repo: MovieRepository) -> Self {
        Self {
            review_repo,
            movie_repo,
        }
    }

    /// Create a review on a movie.
    pub async fn create(
        &self,
        movie_id: i64,
        user_id: i64,
        comment: &str,
    ) -> AppResult<review::Model> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(AppError::Validation(
                "Review comment cannot be empty.".to_string(),
            ));
        }

        // Reviews can only hang off an existing movie.
        self.movie_repo.get_by_id(movie_id).await?;

        let model = review::ActiveModel {
            comment: Set(comment.to_string()),
            movie_id: Set(movie_id),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.review_repo.create(model).await
    }

    /// Get a review the given user owns, for pre-filling the edit form.
    pub async fn get_owned(&self, review_id: i64, user_id: i64) -> AppResult<review::Model> {
        self.review_repo
            .find_by_id_and_user(review_id, user_id)
            .await?
            .ok_or(AppError::ReviewNotFound(review_id))
    }

    /// Edit a review's comment. Only the author may edit.
    pub async fn edit(
        &self,
        review_id: i64,
        user_id: i64,
        comment: &str,
    ) -> AppResult<review::Model> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(AppError::Validation(
                "Review comment cannot be empty.".to_string(),
            ));
        }

        let review = self.get_owned(review_id, user_id).await?;

        let mut active: review::ActiveModel = review.into();
        active.comment = Set(comment.to_string());

        self.review_repo.update(active).await
    }

    /// Delete a review. Only the author may delete.
    pub async fn delete(&self, review_id: i64, user_id: i64) -> AppResult<()> {
        let review = self.get_owned(review_id, user_id).await?;
        self.review_repo.delete(review).await
    }

    /// List a movie's reviews with their authors, for moderation.
    pub async fn list_for_movie(
        &self,
        movie_id: i64,
    ) -> AppResult<Vec<(review::Model, Option<user::Model>)>> {
        self.movie_repo.get_by_id(movie_id).await?;
        self.review_repo.find_by_movie_with_authors(movie_id).await
    }

    /// Delete any review regardless of who wrote it. Moderation only,
    /// callers are responsible for gating on admin.
    pub async fn delete_any(&self, review_id: i64) -> AppResult<()> {
        let review = self
            .review_repo
            .find_by_id(review_id)
            .await?
            .ok_or(AppError::ReviewNotFound(review_id))?;
        self.review_repo.delete(review).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use marquee_db::entities::movie;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_movie(id: i64) -> movie::Model {
        movie::Model {
            id,
            name: "Dune".to_string(),
            price: 10,
            description: "Desert epic".to_string(),
            image: "movie_images/dune.jpg".to_string(),
            amount_left: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_review(id: i64, movie_id: i64, user_id: i64, comment: &str) -> review::Model {
        review::Model {
            id,
            comment: comment.to_string(),
            movie_id,
            user_id,
            created_at: Utc::now().into(),
        }
    }

    fn service(review_db: MockDatabase, movie_db: MockDatabase) -> ReviewService {
        ReviewService::new(
            ReviewRepository::new(Arc::new(review_db.into_connection())),
            MovieRepository::new(Arc::new(movie_db.into_connection())),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_blank_comment() {
        let review_db = MockDatabase::new(DatabaseBackend::Postgres);
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres);

        let result = service(review_db, movie_db).create(1, 1, "   ").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_missing_movie() {
        let review_db = MockDatabase::new(DatabaseBackend::Postgres);
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<movie::Model>::new()]);

        let result = service(review_db, movie_db).create(99, 1, "Great").await;
        assert!(matches!(result, Err(AppError::MovieNotFound(99))));
    }

    #[tokio::test]
    async fn test_create_trims_comment() {
        let saved = create_test_review(1, 1, 1, "Great movie");
        let review_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[saved]]);
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_movie(1)]]);

        let review = service(review_db, movie_db)
            .create(1, 1, "  Great movie  ")
            .await
            .unwrap();
        assert_eq!(review.comment, "Great movie");
    }

    #[tokio::test]
    async fn test_edit_scoped_to_owner() {
        // The ownership-scoped lookup finds nothing for a different user.
        let review_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<review::Model>::new()]);
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres);

        let result = service(review_db, movie_db).edit(5, 2, "Hijack").await;
        assert!(matches!(result, Err(AppError::ReviewNotFound(5))));
    }

    #[tokio::test]
    async fn test_edit_updates_comment() {
        let existing = create_test_review(5, 1, 1, "Old");
        let updated = create_test_review(5, 1, 1, "New");
        let review_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing], vec![updated]]);
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres);

        let review = service(review_db, movie_db).edit(5, 1, "New").await.unwrap();
        assert_eq!(review.comment, "New");
    }

    #[tokio::test]
    async fn test_delete_scoped_to_owner() {
        let review_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<review::Model>::new()]);
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres);

        let result = service(review_db, movie_db).delete(5, 2).await;
        assert!(matches!(result, Err(AppError::ReviewNotFound(5))));
    }

    #[tokio::test]
    async fn test_delete_owned_review() {
        let existing = create_test_review(5, 1, 1, "Old");
        let review_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]);
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres);

        service(review_db, movie_db).delete(5, 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_any_missing_review() {
        let review_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<review::Model>::new()]);
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres);

        let result = service(review_db, movie_db).delete_any(99).await;
        assert!(matches!(result, Err(AppError::ReviewNotFound(99))));
    }

    #[tokio::test]
    async fn test_delete_any_ignores_ownership() {
        // Review written by user 7; the moderation delete takes it down
        // without an owner filter on the lookup.
        let existing = create_test_review(5, 1, 7, "Spam");
        let review_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]);
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres);

        service(review_db, movie_db).delete_any(5).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_for_movie_missing_movie() {
        let review_db = MockDatabase::new(DatabaseBackend::Postgres);
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<movie::Model>::new()]);

        let result = service(review_db, movie_db).list_for_movie(99).await;
        assert!(matches!(result, Err(AppError::MovieNotFound(99))));
    }
}
