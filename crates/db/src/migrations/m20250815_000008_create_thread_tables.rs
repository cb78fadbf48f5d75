//! Create thread, `thread_reply`, and reaction tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Thread::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Thread::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Thread::CommunityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Thread::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Thread::Title).string_len(300).not_null())
                    .col(ColumnDef::new(Thread::Content).text().not_null())
                    .col(
                        ColumnDef::new(Thread::IsPinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Thread::ReplyCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Thread::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Thread::LastActivityAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Thread::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Thread::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_thread_community")
                            .from(Thread::Table, Thread::CommunityId)
                            .to(Community::Table, Community::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_thread_author")
                            .from(Thread::Table, Thread::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_thread_community_activity")
                    .table(Thread::Table)
                    .col(Thread::CommunityId)
                    .col(Thread::LastActivityAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ThreadReply::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ThreadReply::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ThreadReply::ThreadId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ThreadReply::AuthorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ThreadReply::ParentReplyId).big_integer())
                    .col(ColumnDef::new(ThreadReply::Content).text().not_null())
                    .col(
                        ColumnDef::new(ThreadReply::Depth)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ThreadReply::ReactionCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ThreadReply::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ThreadReply::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_thread_reply_thread")
                            .from(ThreadReply::Table, ThreadReply::ThreadId)
                            .to(Thread::Table, Thread::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_thread_reply_author")
                            .from(ThreadReply::Table, ThreadReply::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_thread_reply_parent")
                            .from(ThreadReply::Table, ThreadReply::ParentReplyId)
                            .to(ThreadReply::Table, ThreadReply::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_thread_reply_thread_id")
                    .table(ThreadReply::Table)
                    .col(ThreadReply::ThreadId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reaction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reaction::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reaction::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Reaction::TargetType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reaction::TargetId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Reaction::ReactionType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reaction::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reaction_user")
                            .from(Reaction::Table, Reaction::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One reaction per user, target, and reaction type.
        manager
            .create_index(
                Index::create()
                    .name("idx_reaction_unique")
                    .table(Reaction::Table)
                    .col(Reaction::UserId)
                    .col(Reaction::TargetType)
                    .col(Reaction::TargetId)
                    .col(Reaction::ReactionType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reaction_target")
                    .table(Reaction::Table)
                    .col(Reaction::TargetType)
                    .col(Reaction::TargetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reaction::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ThreadReply::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Thread::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Thread {
    Table,
    Id,
    CommunityId,
    AuthorId,
    Title,
    Content,
    IsPinned,
    ReplyCount,
    ViewCount,
    LastActivityAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ThreadReply {
    Table,
    Id,
    ThreadId,
    AuthorId,
    ParentReplyId,
    Content,
    Depth,
    ReactionCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Reaction {
    Table,
    Id,
    UserId,
    TargetType,
    TargetId,
    ReactionType,
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
