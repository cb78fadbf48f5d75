//! Discussion thread entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Thread entity - a threaded discussion inside a community.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "thread")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Community the thread belongs to.
    #[sea_orm(indexed)]
    pub community_id: i64,

    /// Author of the opening post.
    #[sea_orm(indexed)]
    pub author_id: i64,

    /// Thread title.
    pub title: String,

    /// Opening post body.
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Pinned threads list before everything else.
    #[sea_orm(default_value = false)]
    pub is_pinned: bool,

    /// Number of replies (denormalized, advisory).
    #[sea_orm(default_value = 0)]
    pub reply_count: i64,

    /// Number of fetch-by-id views (denormalized, advisory).
    #[sea_orm(default_value = 0)]
    pub view_count: i64,

    /// Touched on every new reply; drives the community thread ordering.
    pub last_activity_at: DateTimeWithTimeZone,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::community::Entity",
        from = "Column::CommunityId",
        to = "super::community::Column::Id",
        on_delete = "Cascade"
    )]
    Community,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::thread_reply::Entity")]
    Replies,
}

impl Related<super::community::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Community.def()
    }
}

impl Related<super::thread_reply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Replies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
