//! Event RSVP entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// RSVP answer for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "kebab-case")]
pub enum RsvpStatus {
    /// Counted toward the event attendee count.
    #[sea_orm(string_value = "going")]
    Going,
    #[sea_orm(string_value = "interested")]
    Interested,
    #[sea_orm(string_value = "not-going")]
    NotGoing,
}

impl RsvpStatus {
    /// Whether this answer counts toward attendance.
    #[must_use]
    pub const fn is_going(&self) -> bool {
        matches!(self, Self::Going)
    }
}

/// Event RSVP - records a user's answer to an event.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_rsvp")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// The event being answered.
    #[sea_orm(indexed)]
    pub event_id: i64,

    /// The answering user.
    #[sea_orm(indexed)]
    pub user_id: i64,

    /// The answer.
    pub status: RsvpStatus,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "Cascade"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
