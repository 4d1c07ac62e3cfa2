//! Catalog service: movie listing, detail, and the administrative edit path.

use crate::admin;
use marquee_common::{AppError, AppResult};
use marquee_db::{
    entities::{movie, review, user},
    repositories::{MovieRepository, ReviewRepository},
};
use sea_orm::Set;

/// Catalog service for business logic.
#[derive(Clone)]
pub struct CatalogService {
    movie_repo: MovieRepository,
    review_repo: ReviewRepository,
}

/// Input for creating a movie through the administrative interface.
#[derive(Debug)]
pub struct CreateMovieInput {
    pub name: String,
    pub price: i32,
    pub description: String,
    pub image: String,
    pub amount_left: Option<i32>,
}

/// Input for editing a movie through the administrative interface.
///
/// The form submits every field; `amount_left` of `None` means unlimited
/// stock, not "leave unchanged".
#[derive(Debug)]
pub struct UpdateMovieInput {
    pub name: String,
    pub price: i32,
    pub description: String,
    pub image: String,
    pub amount_left: Option<i32>,
}

/// A movie together with its reviews and their authors.
pub struct MovieDetail {
    pub movie: movie::Model,
    pub reviews: Vec<(review::Model, Option<user::Model>)>,
}

impl CatalogService {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(movie_repo: MovieRepository, review_repo: ReviewRepository) -> Self {
        Self {
            movie_repo,
            review_repo,
        }
    }

    /// List movies for the catalog, optionally filtered by a
    /// case-insensitive name substring. Sold-out movies are excluded.
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<movie::Model>> {
        let term = search.map(str::trim).filter(|t| !t.is_empty());
        self.movie_repo.find_available(term).await
    }

    /// Get a movie with all its reviews.
    pub async fn get(&self, id: i64) -> AppResult<MovieDetail> {
        let movie = self.movie_repo.get_by_id(id).await?;
        let reviews = self.review_repo.find_by_movie_with_authors(id).await?;

        Ok(MovieDetail { movie, reviews })
    }

    /// Create a movie (administrative path).
    pub async fn create_movie(&self, input: CreateMovieInput) -> AppResult<movie::Model> {
        validate_movie_fields(&input.name, input.price)?;
        admin::validate_stock_value(input.amount_left)?;

        let model = movie::ActiveModel {
            name: Set(input.name.trim().to_string()),
            price: Set(input.price),
            description: Set(input.description),
            image: Set(input.image),
            amount_left: Set(input.amount_left),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.movie_repo.create(model).await
    }

    /// Edit a movie (administrative path).
    ///
    /// Applies the stock-lock rule: once the stored stock count is exactly
    /// zero, any edit moving it away from zero is rejected.
    pub async fn edit_movie(&self, id: i64, input: UpdateMovieInput) -> AppResult<movie::Model> {
        let movie = self.movie_repo.get_by_id(id).await?;

        validate_movie_fields(&input.name, input.price)?;
        admin::validate_stock_value(input.amount_left)?;
        admin::validate_stock_change(movie.amount_left, input.amount_left)?;

        let mut active: movie::ActiveModel = movie.into();
        active.name = Set(input.name.trim().to_string());
        active.price = Set(input.price);
        active.description = Set(input.description);
        active.image = Set(input.image);
        active.amount_left = Set(input.amount_left);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.movie_repo.update(active).await
    }

    /// Delete a movie (administrative path). Cascades to its reviews.
    pub async fn delete_movie(&self, id: i64) -> AppResult<()> {
        // Ensure the id exists so a bad id reports NotFound, not success.
        self.movie_repo.get_by_id(id).await?;
        self.movie_repo.delete(id).await
    }
}

fn validate_movie_fields(name: &str, price: i32) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Movie name cannot be empty.".to_string()));
    }
    if price < 0 {
        return Err(AppError::Validation("Price cannot be negative.".to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_movie(id: i64, name: &str, amount_left: Option<i32>) -> movie::Model {
        movie::Model {
            id,
            name: name.to_string(),
            price: 10,
            description: "test".to_string(),
            image: "movie_images/test.jpg".to_string(),
            amount_left,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn update_input(amount_left: Option<i32>) -> UpdateMovieInput {
        UpdateMovieInput {
            name: "Dune".to_string(),
            price: 10,
            description: "Desert epic".to_string(),
            image: "movie_images/dune.jpg".to_string(),
            amount_left,
        }
    }

    fn service(movie_db: MockDatabase, review_db: MockDatabase) -> CatalogService {
        CatalogService::new(
            MovieRepository::new(Arc::new(movie_db.into_connection())),
            ReviewRepository::new(Arc::new(review_db.into_connection())),
        )
    }

    #[tokio::test]
    async fn test_get_movie_not_found() {
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<movie::Model>::new()]);
        let review_db = MockDatabase::new(DatabaseBackend::Postgres);

        let result = service(movie_db, review_db).get(42).await;
        assert!(matches!(result, Err(AppError::MovieNotFound(42))));
    }

    #[tokio::test]
    async fn test_list_passes_through_available_movies() {
        let m1 = create_test_movie(1, "Dune", None);
        let m2 = create_test_movie(2, "Arrival", Some(3));

        let movie_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[m1, m2]]);
        let review_db = MockDatabase::new(DatabaseBackend::Postgres);

        let movies = service(movie_db, review_db).list(None).await.unwrap();
        assert_eq!(movies.len(), 2);
    }

    #[tokio::test]
    async fn test_list_blank_search_treated_as_none() {
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<movie::Model>::new()]);
        let review_db = MockDatabase::new(DatabaseBackend::Postgres);

        let movies = service(movie_db, review_db).list(Some("   ")).await.unwrap();
        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn test_edit_stock_locked_at_zero() {
        let stored = create_test_movie(1, "Dune", Some(0));
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored]]);
        let review_db = MockDatabase::new(DatabaseBackend::Postgres);

        let result = service(movie_db, review_db)
            .edit_movie(1, update_input(Some(5)))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_edit_stock_zero_to_zero_is_noop() {
        let stored = create_test_movie(1, "Dune", Some(0));
        let updated = create_test_movie(1, "Dune", Some(0));
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored], vec![updated]]);
        let review_db = MockDatabase::new(DatabaseBackend::Postgres);

        let result = service(movie_db, review_db)
            .edit_movie(1, update_input(Some(0)))
            .await;
        assert_eq!(result.unwrap().amount_left, Some(0));
    }

    #[tokio::test]
    async fn test_edit_rejects_negative_stock() {
        let stored = create_test_movie(1, "Dune", Some(4));
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored]]);
        let review_db = MockDatabase::new(DatabaseBackend::Postgres);

        let result = service(movie_db, review_db)
            .edit_movie(1, update_input(Some(-2)))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let movie_db = MockDatabase::new(DatabaseBackend::Postgres);
        let review_db = MockDatabase::new(DatabaseBackend::Postgres);

        let result = service(movie_db, review_db)
            .create_movie(CreateMovieInput {
                name: "  ".to_string(),
                price: 10,
                description: "x".to_string(),
                image: "x.jpg".to_string(),
                amount_left: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
