//! Create user table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(User::OpenId)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::Name).string_len(100))
                    .col(ColumnDef::new(User::Email).string_len(320))
                    .col(ColumnDef::new(User::LoginMethod).string_len(64))
                    .col(
                        ColumnDef::new(User::Role)
                            .string_len(20)
                            .not_null()
                            .default("user"),
                    )
                    .col(ColumnDef::new(User::Bio).text())
                    .col(ColumnDef::new(User::AvatarUrl).string_len(500))
                    .col(ColumnDef::new(User::Preferences).json_binary())
                    .col(
                        ColumnDef::new(User::SessionToken)
                            .string_len(128)
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(User::LastSignedIn)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(User::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_session_token")
                    .table(User::Table)
                    .col(User::SessionToken)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum User {
    Table,
    Id,
    OpenId,
    Name,
    Email,
    LoginMethod,
    Role,
    Bio,
    AvatarUrl,
    Preferences,
    SessionToken,
    LastSignedIn,
    CreatedAt,
    UpdatedAt,
}
