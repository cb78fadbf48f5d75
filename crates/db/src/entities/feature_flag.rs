//! Feature flag entity for server-side rollout control.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Explicit list of user ids a flag targets.
///
/// When present and non-empty, membership in this list overrides the
/// percentage rollout entirely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct TargetUserIds(pub Vec<i64>);

impl TargetUserIds {
    /// Check whether the list targets the given user.
    #[must_use]
    pub fn contains(&self, user_id: i64) -> bool {
        self.0.contains(&user_id)
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Feature flag entity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feature_flag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Unique flag name.
    #[sea_orm(unique)]
    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Master switch; a disabled flag is off for everyone.
    #[sea_orm(default_value = false)]
    pub enabled: bool,

    /// Gradual rollout percentage, 0-100.
    #[sea_orm(default_value = 0)]
    pub rollout_percentage: i32,

    /// Specific users the flag targets, overriding the percentage.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub target_user_ids: Option<TargetUserIds>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
