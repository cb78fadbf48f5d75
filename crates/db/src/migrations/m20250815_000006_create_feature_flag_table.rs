//! Create `feature_flag` table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeatureFlag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeatureFlag::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeatureFlag::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FeatureFlag::Description).text())
                    .col(
                        ColumnDef::new(FeatureFlag::Enabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(FeatureFlag::RolloutPercentage)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(FeatureFlag::TargetUserIds).json_binary())
                    .col(
                        ColumnDef::new(FeatureFlag::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(FeatureFlag::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeatureFlag::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FeatureFlag {
    Table,
    Id,
    Name,
    Description,
    Enabled,
    RolloutPercentage,
    TargetUserIds,
    CreatedAt,
    UpdatedAt,
}
