//! Event and RSVP repository.

use std::sync::Arc;

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entities::event_rsvp::RsvpStatus;
use crate::entities::{Event, EventRsvp, event, event_rsvp};

/// Repository for community events and RSVPs.
#[derive(Clone)]
pub struct EventRepository {
    db: Arc<DatabaseConnection>,
}

impl EventRepository {
    /// Create a new event repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<event::Model>> {
        Event::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an event by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<event::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event not found: {id}")))
    }

    /// Find events in a community, soonest first.
    pub async fn find_by_community(&self, community_id: i64) -> AppResult<Vec<event::Model>> {
        Event::find()
            .filter(event::Column::CommunityId.eq(community_id))
            .order_by(event::Column::StartTime, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new event.
    pub async fn create(&self, model: event::ActiveModel) -> AppResult<event::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an event.
    pub async fn update(&self, model: event::ActiveModel) -> AppResult<event::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an event and its RSVPs in one transaction.
    ///
    /// The FK cascade would catch the RSVPs anyway; deleting them first
    /// keeps the removal explicit.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        EventRsvp::delete_many()
            .filter(event_rsvp::Column::EventId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Event::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    // ==================== RSVP Operations ====================

    /// Find a user's RSVP for an event.
    pub async fn find_rsvp(
        &self,
        event_id: i64,
        user_id: i64,
    ) -> AppResult<Option<event_rsvp::Model>> {
        EventRsvp::find()
            .filter(event_rsvp::Column::EventId.eq(event_id))
            .filter(event_rsvp::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all of a user's RSVPs, newest first.
    pub async fn find_rsvps_by_user(&self, user_id: i64) -> AppResult<Vec<event_rsvp::Model>> {
        EventRsvp::find()
            .filter(event_rsvp::Column::UserId.eq(user_id))
            .order_by(event_rsvp::Column::CreatedAt, Order::Desc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user's RSVP and keep the attendee count in step,
    /// all in one transaction.
    ///
    /// Only "going" RSVPs count toward attendance.
    pub async fn set_rsvp(
        &self,
        event_id: i64,
        user_id: i64,
        status: RsvpStatus,
    ) -> AppResult<event_rsvp::Model> {
        let existing = self.find_rsvp(event_id, user_id).await?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let (rsvp, was_going) = match existing {
            Some(rsvp) => {
                let was_going = rsvp.status.is_going();
                let mut active: event_rsvp::ActiveModel = rsvp.into();
                active.status = Set(status);
                active.updated_at = Set(Some(Utc::now().into()));
                let updated = active
                    .update(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                (updated, was_going)
            }
            None => {
                let model = event_rsvp::ActiveModel {
                    event_id: Set(event_id),
                    user_id: Set(user_id),
                    status: Set(status),
                    created_at: Set(Utc::now().into()),
                    ..Default::default()
                };
                let created = model
                    .insert(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                (created, false)
            }
        };

        let now_going = rsvp.status.is_going();
        if now_going && !was_going {
            Self::adjust_attendee_count(&txn, event_id, 1).await?;
        } else if was_going && !now_going {
            Self::adjust_attendee_count(&txn, event_id, -1).await?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rsvp)
    }

    async fn adjust_attendee_count<C: ConnectionTrait>(
        conn: &C,
        event_id: i64,
        delta: i32,
    ) -> AppResult<()> {
        use sea_orm::sea_query::Expr;

        let expr = if delta >= 0 {
            Expr::col(event::Column::AttendeeCount).add(delta)
        } else {
            Expr::cust("GREATEST(attendee_count - 1, 0)")
        };

        Event::update_many()
            .col_expr(event::Column::AttendeeCount, expr)
            .filter(event::Column::Id.eq(event_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::event::EventType;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_event(id: i64, community_id: i64, title: &str) -> event::Model {
        event::Model {
            id,
            community_id,
            creator_id: 10,
            title: title.to_string(),
            description: None,
            event_type: EventType::Online,
            start_time: Utc::now().into(),
            end_time: None,
            location: None,
            max_attendees: None,
            attendee_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_community() {
        let e1 = create_test_event(1, 5, "Book Club");
        let e2 = create_test_event(2, 5, "Game Night");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[e1, e2]])
                .into_connection(),
        );

        let repo = EventRepository::new(db);
        let result = repo.find_by_community(5).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "Book Club");
    }

    #[tokio::test]
    async fn test_find_rsvp_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<event_rsvp::Model>::new()])
                .into_connection(),
        );

        let repo = EventRepository::new(db);
        let result = repo.find_rsvp(1, 10).await.unwrap();

        assert!(result.is_none());
    }
}
