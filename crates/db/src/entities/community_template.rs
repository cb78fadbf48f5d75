//! Community template entity (reference data).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category a pre-built community layout belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum TemplateCategory {
    #[sea_orm(string_value = "fan-club")]
    FanClub,
    #[sea_orm(string_value = "workshop")]
    Workshop,
    #[sea_orm(string_value = "professional")]
    Professional,
    #[sea_orm(string_value = "study-group")]
    StudyGroup,
    #[sea_orm(string_value = "creator")]
    Creator,
    #[sea_orm(string_value = "general")]
    General,
}

/// Community template - a pre-built community layout.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "community_template")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub category: TemplateCategory,

    /// Default widgets for communities built from this template.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub widget_config: Option<Json>,

    /// Only public templates are listed.
    #[sea_orm(default_value = true)]
    pub is_public: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
