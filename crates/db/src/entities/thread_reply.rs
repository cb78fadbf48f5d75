//! Thread reply entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Thread reply - a reply inside a discussion thread, optionally nested.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "thread_reply")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Thread the reply belongs to.
    #[sea_orm(indexed)]
    pub thread_id: i64,

    /// Author of the reply.
    #[sea_orm(indexed)]
    pub author_id: i64,

    /// Parent reply for nested replies; None for top-level replies.
    #[sea_orm(nullable)]
    pub parent_reply_id: Option<i64>,

    /// Reply body.
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Nesting level.
    #[sea_orm(default_value = 0)]
    pub depth: i32,

    /// Number of reactions (denormalized, advisory).
    #[sea_orm(default_value = 0)]
    pub reaction_count: i64,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::thread::Entity",
        from = "Column::ThreadId",
        to = "super::thread::Column::Id",
        on_delete = "Cascade"
    )]
    Thread,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentReplyId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    Parent,
}

impl Related<super::thread::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Thread.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
