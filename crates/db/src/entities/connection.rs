//! Connection entity linking two users.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status of a connection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "blocked")]
    Blocked,
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Connection entity - a relationship between two users.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "connection")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// User who sent the request.
    #[sea_orm(indexed)]
    pub requester_id: i64,

    /// User who received the request.
    #[sea_orm(indexed)]
    pub receiver_id: i64,

    /// Current status.
    pub status: ConnectionStatus,

    /// Compatibility score, computed elsewhere and kept private.
    #[sea_orm(nullable)]
    pub compatibility_score: Option<i32>,

    /// Shared interests (opaque array payload).
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub shared_interests: Option<Json>,

    pub created_at: DateTimeWithTimeZone,

    /// Touched on every status change; drives connection list ordering.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RequesterId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Requester,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReceiverId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Receiver,
}

impl ActiveModelBehavior for ActiveModel {}
