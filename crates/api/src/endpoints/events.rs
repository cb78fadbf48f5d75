//! Event endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::AppResult;
use nexus_core::{CreateEventInput, RsvpInput};
use nexus_db::entities::event::{self, EventType};
use nexus_db::entities::event_rsvp::{self, RsvpStatus};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, SuccessResponse},
};

/// Event response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: i64,
    pub community_id: i64,
    pub creator_id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub start_time: String,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub max_attendees: Option<i32>,
    pub attendee_count: i32,
    pub created_at: String,
}

impl From<event::Model> for EventResponse {
    fn from(e: event::Model) -> Self {
        Self {
            id: e.id,
            community_id: e.community_id,
            creator_id: e.creator_id,
            title: e.title,
            description: e.description,
            event_type: e.event_type,
            start_time: e.start_time.to_rfc3339(),
            end_time: e.end_time.map(|dt| dt.to_rfc3339()),
            location: e.location,
            max_attendees: e.max_attendees,
            attendee_count: e.attendee_count,
            created_at: e.created_at.to_rfc3339(),
        }
    }
}

/// RSVP with its event joined in.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyEventResponse {
    pub event_id: i64,
    pub status: RsvpStatus,
    pub created_at: String,
    pub event: Option<EventResponse>,
}

impl From<(event_rsvp::Model, Option<event::Model>)> for MyEventResponse {
    fn from((r, event): (event_rsvp::Model, Option<event::Model>)) -> Self {
        Self {
            event_id: r.event_id,
            status: r.status,
            created_at: r.created_at.to_rfc3339(),
            event: event.map(Into::into),
        }
    }
}

/// List events request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsRequest {
    pub community_id: i64,
}

/// Delete event request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventRequest {
    pub event_id: i64,
}

/// Create event response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponse {
    pub success: bool,
    pub event_id: i64,
}

/// List events in a community, soonest first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListEventsRequest>,
) -> AppResult<ApiResponse<Vec<EventResponse>>> {
    let events = state
        .event_service
        .list_by_community(req.community_id)
        .await?;

    Ok(ApiResponse::ok(
        events.into_iter().map(Into::into).collect(),
    ))
}

/// List the caller's RSVPs with event info.
async fn my_events(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<MyEventResponse>>> {
    let rsvps = state.event_service.list_rsvps_with_events(user.id).await?;

    Ok(ApiResponse::ok(rsvps.into_iter().map(Into::into).collect()))
}

/// Create an event.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateEventInput>,
) -> AppResult<ApiResponse<CreateEventResponse>> {
    let event = state.event_service.create(user.id, input).await?;

    Ok(ApiResponse::ok(CreateEventResponse {
        success: true,
        event_id: event.id,
    }))
}

/// Delete an event and its RSVPs.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteEventRequest>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state.event_service.delete(user.id, req.event_id).await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

/// Set the caller's RSVP.
async fn rsvp(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RsvpInput>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state.event_service.rsvp(user.id, input).await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/my-events", post(my_events))
        .route("/create", post(create))
        .route("/delete", post(delete))
        .route("/rsvp", post(rsvp))
}
