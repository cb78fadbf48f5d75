//! Event service.

use chrono::{DateTime, Utc};
use nexus_common::{AppError, AppResult};
use nexus_db::entities::event::{self, EventType};
use nexus_db::entities::event_rsvp::{self, RsvpStatus};
use nexus_db::repositories::EventRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating an event.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    pub community_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    #[validate(length(max = 300))]
    pub location: Option<String>,
    #[validate(range(min = 1))]
    pub max_attendees: Option<i32>,
}

/// Input for setting an RSVP.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpInput {
    pub event_id: i64,
    pub status: RsvpStatus,
}

/// Service for community events and RSVPs.
#[derive(Clone)]
pub struct EventService {
    event_repo: EventRepository,
}

impl EventService {
    /// Create a new event service.
    #[must_use]
    pub const fn new(event_repo: EventRepository) -> Self {
        Self { event_repo }
    }

    /// Get an event by ID.
    pub async fn get_by_id(&self, id: i64) -> AppResult<event::Model> {
        self.event_repo.get_by_id(id).await
    }

    /// List events in a community, soonest first.
    pub async fn list_by_community(&self, community_id: i64) -> AppResult<Vec<event::Model>> {
        self.event_repo.find_by_community(community_id).await
    }

    /// Create an event in a community.
    pub async fn create(&self, creator_id: i64, input: CreateEventInput) -> AppResult<event::Model> {
        input.validate()?;

        if let Some(end) = input.end_time {
            if end <= input.start_time {
                return Err(AppError::BadRequest(
                    "Event must end after it starts".to_string(),
                ));
            }
        }

        let model = event::ActiveModel {
            community_id: Set(input.community_id),
            creator_id: Set(creator_id),
            title: Set(input.title),
            description: Set(input.description),
            event_type: Set(input.event_type),
            start_time: Set(input.start_time.into()),
            end_time: Set(input.end_time.map(Into::into)),
            location: Set(input.location),
            max_attendees: Set(input.max_attendees),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.event_repo.create(model).await
    }

    /// Delete an event. Only the creator may delete it.
    pub async fn delete(&self, user_id: i64, event_id: i64) -> AppResult<()> {
        let event = self.event_repo.get_by_id(event_id).await?;
        if event.creator_id != user_id {
            return Err(AppError::Forbidden("Not the event creator".to_string()));
        }
        self.event_repo.delete(event_id).await
    }

    /// Set the caller's RSVP, adjusting the attendee count.
    ///
    /// A "going" RSVP on a full event is rejected.
    pub async fn rsvp(&self, user_id: i64, input: RsvpInput) -> AppResult<event_rsvp::Model> {
        let event = self.event_repo.get_by_id(input.event_id).await?;

        if input.status.is_going() {
            if let Some(max) = event.max_attendees {
                let already_going = self
                    .event_repo
                    .find_rsvp(event.id, user_id)
                    .await?
                    .is_some_and(|r| r.status.is_going());
                if !already_going && event.attendee_count >= max {
                    return Err(AppError::Conflict("This event is full".to_string()));
                }
            }
        }

        self.event_repo.set_rsvp(event.id, user_id, input.status).await
    }

    /// List the caller's RSVPs with their events, newest first.
    pub async fn list_rsvps_with_events(
        &self,
        user_id: i64,
    ) -> AppResult<Vec<(event_rsvp::Model, Option<event::Model>)>> {
        let rsvps = self.event_repo.find_rsvps_by_user(user_id).await?;

        let mut joined = Vec::with_capacity(rsvps.len());
        for rsvp in rsvps {
            let event = self.event_repo.find_by_id(rsvp.event_id).await?;
            joined.push((rsvp, event));
        }

        Ok(joined)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_event(id: i64, max_attendees: Option<i32>, attendee_count: i32) -> event::Model {
        event::Model {
            id,
            community_id: 5,
            creator_id: 10,
            title: "Meetup".to_string(),
            description: None,
            event_type: EventType::Online,
            start_time: Utc::now().into(),
            end_time: None,
            location: None,
            max_attendees,
            attendee_count,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_end_before_start() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = EventService::new(EventRepository::new(db));

        let start = Utc::now();
        let result = service
            .create(
                10,
                CreateEventInput {
                    community_id: 5,
                    title: "Meetup".to_string(),
                    description: None,
                    event_type: EventType::Online,
                    start_time: start,
                    end_time: Some(start - chrono::Duration::hours(1)),
                    location: None,
                    max_attendees: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_rsvp_going_rejects_full_event() {
        let event = create_test_event(1, Some(2), 2);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[event]])
                .append_query_results([Vec::<event_rsvp::Model>::new()])
                .into_connection(),
        );

        let service = EventService::new(EventRepository::new(db));
        let result = service
            .rsvp(
                11,
                RsvpInput {
                    event_id: 1,
                    status: RsvpStatus::Going,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_rejects_non_creator() {
        let event = create_test_event(1, None, 0);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[event]])
                .into_connection(),
        );

        let service = EventService::new(EventRepository::new(db));
        let result = service.delete(99, 1).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
