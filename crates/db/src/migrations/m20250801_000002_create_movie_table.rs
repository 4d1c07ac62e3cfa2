//! Create movie table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movie::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movie::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Movie::Price).integer().not_null())
                    .col(ColumnDef::new(Movie::Description).text().not_null())
                    .col(ColumnDef::new(Movie::Image).string_len(512).not_null())
                    // NULL = unlimited stock; the check keeps stored counts non-negative
                    .col(ColumnDef::new(Movie::AmountLeft).integer().null())
                    .col(
                        ColumnDef::new(Movie::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Movie::UpdatedAt).timestamp_with_time_zone().null())
                    .check(Expr::col(Movie::AmountLeft).gte(0))
                    .to_owned(),
            )
            .await?;

        // Index: name (for substring search in the listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_name")
                    .table(Movie::Table)
                    .col(Movie::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movie::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Movie {
    Table,
    Id,
    Name,
    Price,
    Description,
    Image,
    AmountLeft,
    CreatedAt,
    UpdatedAt,
}
