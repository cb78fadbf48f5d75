//! Create `community_widget` and `community_template` tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommunityWidget::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityWidget::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommunityWidget::CommunityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityWidget::WidgetType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityWidget::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CommunityWidget::Content).text())
                    .col(
                        ColumnDef::new(CommunityWidget::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CommunityWidget::IsVisible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CommunityWidget::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityWidget::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(CommunityWidget::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_widget_community")
                            .from(CommunityWidget::Table, CommunityWidget::CommunityId)
                            .to(Community::Table, Community::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_widget_creator")
                            .from(CommunityWidget::Table, CommunityWidget::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_community_widget_community_id")
                    .table(CommunityWidget::Table)
                    .col(CommunityWidget::CommunityId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommunityTemplate::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityTemplate::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommunityTemplate::Name)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CommunityTemplate::Description).text())
                    .col(
                        ColumnDef::new(CommunityTemplate::Category)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CommunityTemplate::WidgetConfig).json_binary())
                    .col(
                        ColumnDef::new(CommunityTemplate::IsPublic)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CommunityTemplate::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommunityTemplate::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommunityWidget::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CommunityWidget {
    Table,
    Id,
    CommunityId,
    WidgetType,
    Title,
    Content,
    Position,
    IsVisible,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CommunityTemplate {
    Table,
    Id,
    Name,
    Description,
    Category,
    WidgetConfig,
    IsPublic,
    CreatedAt,
}

#[derive(Iden)]
enum Community {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
