//! Create page and widget tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Page::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Page::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Page::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Page::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Page::PageType).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Page::Visibility)
                            .string_len(20)
                            .not_null()
                            .default("public"),
                    )
                    .col(ColumnDef::new(Page::LayoutConfig).json_binary())
                    .col(
                        ColumnDef::new(Page::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Page::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_page_user")
                            .from(Page::Table, Page::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_page_user_id")
                    .table(Page::Table)
                    .col(Page::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Widget::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Widget::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Widget::PageId).big_integer().not_null())
                    .col(ColumnDef::new(Widget::WidgetType).string_len(50).not_null())
                    .col(ColumnDef::new(Widget::Position).json_binary().not_null())
                    .col(ColumnDef::new(Widget::Config).json_binary())
                    .col(
                        ColumnDef::new(Widget::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Widget::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_widget_page")
                            .from(Widget::Table, Widget::PageId)
                            .to(Page::Table, Page::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_widget_page_id")
                    .table(Widget::Table)
                    .col(Widget::PageId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Widget::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Page::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Page {
    Table,
    Id,
    UserId,
    Name,
    PageType,
    Visibility,
    LayoutConfig,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Widget {
    Table,
    Id,
    PageId,
    WidgetType,
    Position,
    Config,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
