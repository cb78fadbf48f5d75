//! Widget entity for page widget instances.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Position and size of a widget on the page grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct WidgetRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Widget entity - a single widget instance placed on a page.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "widget")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Page the widget lives on.
    #[sea_orm(indexed)]
    pub page_id: i64,

    /// Widget kind, e.g. "companion", "community-feed", "calendar", "notes".
    pub widget_type: String,

    /// Grid position, always present.
    #[sea_orm(column_type = "JsonBinary")]
    pub position: WidgetRect,

    /// Widget-specific configuration payload.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub config: Option<Json>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::PageId",
        to = "super::page::Column::Id",
        on_delete = "Cascade"
    )]
    Page,
}

impl Related<super::page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Page.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
