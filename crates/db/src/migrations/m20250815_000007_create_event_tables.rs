//! Create event and `event_rsvp` tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Event::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Event::CommunityId).big_integer().not_null())
                    .col(ColumnDef::new(Event::CreatorId).big_integer().not_null())
                    .col(ColumnDef::new(Event::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Event::Description).text())
                    .col(ColumnDef::new(Event::EventType).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Event::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Event::EndTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(Event::Location).string_len(300))
                    .col(ColumnDef::new(Event::MaxAttendees).integer())
                    .col(
                        ColumnDef::new(Event::AttendeeCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Event::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Event::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_community")
                            .from(Event::Table, Event::CommunityId)
                            .to(Community::Table, Community::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_creator")
                            .from(Event::Table, Event::CreatorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_community_start")
                    .table(Event::Table)
                    .col(Event::CommunityId)
                    .col(Event::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventRsvp::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventRsvp::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventRsvp::EventId).big_integer().not_null())
                    .col(ColumnDef::new(EventRsvp::UserId).big_integer().not_null())
                    .col(ColumnDef::new(EventRsvp::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(EventRsvp::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(EventRsvp::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_rsvp_event")
                            .from(EventRsvp::Table, EventRsvp::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_rsvp_user")
                            .from(EventRsvp::Table, EventRsvp::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_rsvp_user_id")
                    .table(EventRsvp::Table)
                    .col(EventRsvp::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventRsvp::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Event {
    Table,
    Id,
    CommunityId,
    CreatorId,
    Title,
    Description,
    EventType,
    StartTime,
    EndTime,
    Location,
    MaxAttendees,
    AttendeeCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum EventRsvp {
    Table,
    Id,
    EventId,
    UserId,
    Status,
    CreatedAt,
    UpdatedAt,
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
