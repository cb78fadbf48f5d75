//! Community member entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of a community member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum MemberRole {
    /// Creator of the community.
    #[sea_orm(string_value = "owner")]
    Owner,
    /// Moderator - can manage content.
    #[sea_orm(string_value = "moderator")]
    Moderator,
    /// Regular member.
    #[sea_orm(string_value = "member")]
    Member,
}

impl Default for MemberRole {
    fn default() -> Self {
        Self::Member
    }
}

impl MemberRole {
    /// Check if the role has moderation capabilities.
    #[must_use]
    pub const fn can_moderate(&self) -> bool {
        matches!(self, Self::Owner | Self::Moderator)
    }

    /// Check if this is the owner role.
    #[must_use]
    pub const fn is_owner(&self) -> bool {
        matches!(self, Self::Owner)
    }
}

/// Community member - tracks which users belong to which communities.
///
/// The (`community_id`, `user_id`) pair is unique at the schema level.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "community_member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// The community the user belongs to.
    #[sea_orm(indexed)]
    pub community_id: i64,

    /// The user who is a member.
    #[sea_orm(indexed)]
    pub user_id: i64,

    /// Role of the member in the community.
    pub role: MemberRole,

    /// When the user joined.
    pub joined_at: DateTimeWithTimeZone,
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
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::community::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Community.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
