//! Page entity for user-owned widget pages.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of page a user can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    #[sea_orm(string_value = "social")]
    Social,
    #[sea_orm(string_value = "professional")]
    Professional,
    #[sea_orm(string_value = "creative")]
    Creative,
    #[sea_orm(string_value = "private")]
    Private,
    #[sea_orm(string_value = "custom")]
    Custom,
}

/// Who can see a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum PageVisibility {
    #[sea_orm(string_value = "public")]
    Public,
    #[sea_orm(string_value = "semi-public")]
    SemiPublic,
    #[sea_orm(string_value = "private")]
    Private,
    /// Visible only to the owner's AI companion.
    #[sea_orm(string_value = "ai-only")]
    AiOnly,
}

impl Default for PageVisibility {
    fn default() -> Self {
        Self::Public
    }
}

/// Page entity - a personalized widget surface owned by a user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "page")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Owning user.
    #[sea_orm(indexed)]
    pub user_id: i64,

    /// Page name.
    pub name: String,

    /// Kind of page.
    pub page_type: PageType,

    /// Visibility of the page.
    pub visibility: PageVisibility,

    /// Opaque grid layout payload, maintained by the client.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub layout_config: Option<Json>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::widget::Entity")]
    Widgets,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::widget::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Widgets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
