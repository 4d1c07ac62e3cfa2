//! Create vote table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vote::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vote::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vote::PetitionId).big_integer().not_null())
                    .col(ColumnDef::new(Vote::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Vote::VoteType).string_len(3).not_null())
                    .col(
                        ColumnDef::new(Vote::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_petition")
                            .from(Vote::Table, Vote::PetitionId)
                            .to(Petition::Table, Petition::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_user")
                            .from(Vote::Table, Vote::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (petition_id, user_id) - one vote per user per petition.
        // Concurrent first votes by the same user rely on this constraint.
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_petition_user")
                    .table(Vote::Table)
                    .col(Vote::PetitionId)
                    .col(Vote::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: petition_id (for computing vote counts)
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_petition_id")
                    .table(Vote::Table)
                    .col(Vote::PetitionId)
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's votes)
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_user_id")
                    .table(Vote::Table)
                    .col(Vote::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vote::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Vote {
    Table,
    Id,
    PetitionId,
    UserId,
    VoteType,
    CreatedAt,
}

#[derive(Iden)]
enum Petition {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
