//! Post entity for community feed content.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of post content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum PostType {
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "video")]
    Video,
    #[sea_orm(string_value = "link")]
    Link,
    #[sea_orm(string_value = "event")]
    Event,
}

impl Default for PostType {
    fn default() -> Self {
        Self::Text
    }
}

/// Post entity - content shared inside a community.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Community the post belongs to.
    #[sea_orm(indexed)]
    pub community_id: i64,

    /// Author of the post.
    #[sea_orm(indexed)]
    pub author_id: i64,

    /// Post body.
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Kind of post.
    pub post_type: PostType,

    /// Attached media URLs (opaque array payload).
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub media_urls: Option<Json>,

    /// Number of reactions (denormalized, advisory).
    #[sea_orm(default_value = 0)]
    pub reaction_count: i64,

    /// Number of replies (denormalized, advisory).
    #[sea_orm(default_value = 0)]
    pub reply_count: i64,

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
}

impl Related<super::community::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Community.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
