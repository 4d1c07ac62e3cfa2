//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250801_000001_create_user_table;
mod m20250801_000002_create_movie_table;
mod m20250801_000003_create_review_table;
mod m20250801_000004_create_petition_table;
mod m20250801_000005_create_vote_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_user_table::Migration),
            Box::new(m20250801_000002_create_movie_table::Migration),
            Box::new(m20250801_000003_create_review_table::Migration),
            Box::new(m20250801_000004_create_petition_table::Migration),
            Box::new(m20250801_000005_create_vote_table::Migration),
        ]
    }
}
