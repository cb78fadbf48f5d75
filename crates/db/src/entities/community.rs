//! Community entity for topic communities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum CommunityType {
    #[sea_orm(string_value = "interest")]
    Interest,
    #[sea_orm(string_value = "emotional")]
    Emotional,
    #[sea_orm(string_value = "lifestyle")]
    Lifestyle,
    #[sea_orm(string_value = "goal")]
    Goal,
    #[sea_orm(string_value = "dating")]
    Dating,
    #[sea_orm(string_value = "mental-health")]
    MentalHealth,
    #[sea_orm(string_value = "creator")]
    Creator,
    #[sea_orm(string_value = "general")]
    General,
}

/// Community join visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum CommunityVisibility {
    /// Listed publicly, anyone can join.
    #[sea_orm(string_value = "public")]
    Public,
    /// Hidden from listings.
    #[sea_orm(string_value = "private")]
    Private,
    /// Members need an invitation.
    #[sea_orm(string_value = "invite-only")]
    InviteOnly,
}

impl Default for CommunityVisibility {
    fn default() -> Self {
        Self::Public
    }
}

/// Community entity - an interest-based group of users.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "community")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Community name.
    pub name: String,

    /// Community description (optional).
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Kind of community.
    pub community_type: CommunityType,

    /// Visibility of the community.
    pub visibility: CommunityVisibility,

    /// User who created the community.
    #[sea_orm(indexed)]
    pub creator_id: i64,

    /// Avatar URL (optional).
    #[sea_orm(nullable)]
    pub avatar_url: Option<String>,

    /// Number of members (denormalized, bumped on join/leave).
    #[sea_orm(default_value = 0)]
    pub member_count: i64,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Creator,
    #[sea_orm(has_many = "super::community_member::Entity")]
    Members,
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
    #[sea_orm(has_many = "super::thread::Entity")]
    Threads,
    #[sea_orm(has_many = "super::event::Entity")]
    Events,
    #[sea_orm(has_many = "super::community_widget::Entity")]
    Widgets,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::community_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::thread::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Threads.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
