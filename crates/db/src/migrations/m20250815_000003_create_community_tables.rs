//! Create community, `community_member`, and post tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Community::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Community::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Community::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Community::Description).text())
                    .col(
                        ColumnDef::new(Community::CommunityType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Community::Visibility)
                            .string_len(20)
                            .not_null()
                            .default("public"),
                    )
                    .col(ColumnDef::new(Community::CreatorId).big_integer().not_null())
                    .col(ColumnDef::new(Community::AvatarUrl).string_len(500))
                    .col(
                        ColumnDef::new(Community::MemberCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Community::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Community::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_creator")
                            .from(Community::Table, Community::CreatorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_community_member_count")
                    .table(Community::Table)
                    .col(Community::MemberCount)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommunityMember::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityMember::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommunityMember::CommunityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityMember::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityMember::Role)
                            .string_len(20)
                            .not_null()
                            .default("member"),
                    )
                    .col(
                        ColumnDef::new(CommunityMember::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_member_community")
                            .from(CommunityMember::Table, CommunityMember::CommunityId)
                            .to(Community::Table, Community::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_member_user")
                            .from(CommunityMember::Table, CommunityMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One membership row per (community, user) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_community_member_unique")
                    .table(CommunityMember::Table)
                    .col(CommunityMember::CommunityId)
                    .col(CommunityMember::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_community_member_user_id")
                    .table(CommunityMember::Table)
                    .col(CommunityMember::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Post::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Post::CommunityId).big_integer().not_null())
                    .col(ColumnDef::new(Post::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Post::Content).text().not_null())
                    .col(
                        ColumnDef::new(Post::PostType)
                            .string_len(20)
                            .not_null()
                            .default("text"),
                    )
                    .col(ColumnDef::new(Post::MediaUrls).json_binary())
                    .col(
                        ColumnDef::new(Post::ReactionCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Post::ReplyCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Post::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Post::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_community")
                            .from(Post::Table, Post::CommunityId)
                            .to(Community::Table, Community::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_author")
                            .from(Post::Table, Post::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_post_community_id")
                    .table(Post::Table)
                    .col(Post::CommunityId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommunityMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Community::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Community {
    Table,
    Id,
    Name,
    Description,
    CommunityType,
    Visibility,
    CreatorId,
    AvatarUrl,
    MemberCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CommunityMember {
    Table,
    Id,
    CommunityId,
    UserId,
    Role,
    JoinedAt,
}

#[derive(Iden)]
enum Post {
    Table,
    Id,
    CommunityId,
    AuthorId,
    Content,
    PostType,
    MediaUrls,
    ReactionCount,
    ReplyCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
