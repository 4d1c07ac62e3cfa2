//! Create petition table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Petition::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Petition::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Petition::MovieTitle).string_len(255).not_null())
                    .col(ColumnDef::new(Petition::MovieDescription).text().not_null())
                    .col(ColumnDef::new(Petition::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(Petition::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Petition::IsProcessed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_petition_user")
                            .from(Petition::Table, Petition::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: created_at (the listing is always newest-first)
        manager
            .create_index(
                Index::create()
                    .name("idx_petition_created_at")
                    .table(Petition::Table)
                    .col(Petition::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index: created_by (for per-user petition lookups)
        manager
            .create_index(
                Index::create()
                    .name("idx_petition_created_by")
                    .table(Petition::Table)
                    .col(Petition::CreatedBy)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Petition::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Petition {
    Table,
    Id,
    MovieTitle,
    MovieDescription,
    CreatedBy,
    CreatedAt,
    IsProcessed,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
