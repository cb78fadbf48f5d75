//! Reaction entity (emoji reactions to posts, threads, and replies).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// What a reaction points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum ReactionTarget {
    #[sea_orm(string_value = "post")]
    Post,
    #[sea_orm(string_value = "thread")]
    Thread,
    #[sea_orm(string_value = "reply")]
    Reply,
}

/// Reaction - a user's emoji reaction to a piece of content.
///
/// The (`user_id`, `target_type`, `target_id`, `reaction_type`) tuple is
/// unique at the schema level; the toggle semantics live in the service.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// The reacting user.
    #[sea_orm(indexed)]
    pub user_id: i64,

    /// What kind of content is being reacted to.
    pub target_type: ReactionTarget,

    /// Id of the target post, thread, or reply.
    #[sea_orm(indexed)]
    pub target_id: i64,

    /// The reaction emoji or name.
    pub reaction_type: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
