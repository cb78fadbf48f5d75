//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    /// Regular user.
    #[sea_orm(string_value = "user")]
    User,
    /// Administrator - may manage feature flags.
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

impl UserRole {
    /// Check whether the role grants admin capabilities.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// User entity - an account resolved from the external OAuth identity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// External OAuth identifier. Unique per user.
    #[sea_orm(unique)]
    pub open_id: String,

    /// Display name.
    #[sea_orm(nullable)]
    pub name: Option<String>,

    /// Email address.
    #[sea_orm(nullable)]
    pub email: Option<String>,

    /// Login method reported by the OAuth collaborator.
    #[sea_orm(nullable)]
    pub login_method: Option<String>,

    /// Account role.
    pub role: UserRole,

    /// Profile description.
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    /// Avatar URL.
    #[sea_orm(nullable)]
    pub avatar_url: Option<String>,

    /// Opaque user preferences payload.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub preferences: Option<Json>,

    /// Session token set by the OAuth callback; resolved by the auth middleware.
    #[sea_orm(unique, nullable)]
    pub session_token: Option<String>,

    /// When the user last signed in.
    pub last_signed_in: DateTimeWithTimeZone,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::page::Entity")]
    Pages,
    #[sea_orm(has_many = "super::community_member::Entity")]
    Memberships,
    #[sea_orm(has_one = "super::companion::Entity")]
    Companion,
}

impl Related<super::page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pages.def()
    }
}

impl Related<super::community_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl Related<super::companion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
