//! Community widget entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Community widget - a content block on a community's space.
///
/// Listing only surfaces visible widgets, ordered by position.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "community_widget")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Community the widget belongs to.
    #[sea_orm(indexed)]
    pub community_id: i64,

    /// Widget kind, e.g. "announcement", "poll", "resources", "members".
    pub widget_type: String,

    /// Widget title.
    pub title: String,

    /// User-authored widget content.
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,

    /// Display order.
    #[sea_orm(default_value = 0)]
    pub position: i32,

    /// Hidden widgets are skipped by listings.
    #[sea_orm(default_value = true)]
    pub is_visible: bool,

    /// User who created the widget.
    pub created_by: i64,

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
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Creator,
}

impl Related<super::community::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Community.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
