//! AI companion entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Default companion name used on lazy creation.
pub const DEFAULT_COMPANION_NAME: &str = "NEX";

/// How the companion speaks to its user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum VoiceMode {
    #[sea_orm(string_value = "speak")]
    Speak,
    #[sea_orm(string_value = "guide")]
    Guide,
    #[sea_orm(string_value = "silent")]
    Silent,
    #[sea_orm(string_value = "muted")]
    Muted,
}

impl Default for VoiceMode {
    fn default() -> Self {
        Self::Guide
    }
}

/// Companion entity - per-user AI assistant configuration.
///
/// Created lazily on first access with the default name.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companion")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Owning user, one companion per user.
    #[sea_orm(unique)]
    pub user_id: i64,

    /// Companion display name.
    pub name: String,

    /// Avatar preset identifier.
    pub avatar_type: String,

    /// Voice mode.
    pub voice_mode: VoiceMode,

    /// Personality traits payload.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub personality_config: Option<Json>,

    /// Which features have been introduced to the user.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub onboarding_progress: Option<Json>,

    /// User preferences for companion behavior.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub preferences: Option<Json>,

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
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
