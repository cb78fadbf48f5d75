//! Create companion table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companion::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Companion::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Companion::Name)
                            .string_len(50)
                            .not_null()
                            .default("NEX"),
                    )
                    .col(
                        ColumnDef::new(Companion::AvatarType)
                            .string_len(50)
                            .not_null()
                            .default("default"),
                    )
                    .col(
                        ColumnDef::new(Companion::VoiceMode)
                            .string_len(20)
                            .not_null()
                            .default("guide"),
                    )
                    .col(ColumnDef::new(Companion::PersonalityConfig).json_binary())
                    .col(ColumnDef::new(Companion::OnboardingProgress).json_binary())
                    .col(ColumnDef::new(Companion::Preferences).json_binary())
                    .col(
                        ColumnDef::new(Companion::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Companion::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companion_user")
                            .from(Companion::Table, Companion::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Companion::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Companion {
    Table,
    Id,
    UserId,
    Name,
    AvatarType,
    VoiceMode,
    PersonalityConfig,
    OnboardingProgress,
    Preferences,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
