//! Event entity for community events.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How an event takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    #[sea_orm(string_value = "online")]
    Online,
    #[sea_orm(string_value = "in-person")]
    InPerson,
    #[sea_orm(string_value = "hybrid")]
    Hybrid,
}

/// Event entity - a scheduled gathering inside a community.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Community hosting the event.
    #[sea_orm(indexed)]
    pub community_id: i64,

    /// User who created the event.
    pub creator_id: i64,

    /// Event title.
    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// How the event takes place.
    pub event_type: EventType,

    /// When the event starts.
    pub start_time: DateTimeWithTimeZone,

    /// When the event ends (optional).
    #[sea_orm(nullable)]
    pub end_time: Option<DateTimeWithTimeZone>,

    /// Where the event takes place (optional).
    #[sea_orm(nullable)]
    pub location: Option<String>,

    /// Attendance cap (optional, advisory).
    #[sea_orm(nullable)]
    pub max_attendees: Option<i32>,

    /// Number of "going" RSVPs (denormalized, advisory).
    #[sea_orm(default_value = 0)]
    pub attendee_count: i32,

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
        from = "Column::CreatorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Creator,
    #[sea_orm(has_many = "super::event_rsvp::Entity")]
    Rsvps,
}

impl Related<super::community::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Community.def()
    }
}

impl Related<super::event_rsvp::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rsvps.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
