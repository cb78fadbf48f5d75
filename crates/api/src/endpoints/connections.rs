//! Connection endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::AppResult;
use nexus_core::{RequestConnectionInput, RespondConnectionInput};
use nexus_db::entities::connection::{self, ConnectionStatus};
use serde::Serialize;

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, SuccessResponse},
};

/// Connection response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionResponse {
    pub id: i64,
    pub requester_id: i64,
    pub receiver_id: i64,
    pub status: ConnectionStatus,
    pub compatibility_score: Option<i32>,
    pub shared_interests: Option<serde_json::Value>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<connection::Model> for ConnectionResponse {
    fn from(c: connection::Model) -> Self {
        Self {
            id: c.id,
            requester_id: c.requester_id,
            receiver_id: c.receiver_id,
            status: c.status,
            compatibility_score: c.compatibility_score,
            shared_interests: c.shared_interests,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// Request connection response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConnectionResponse {
    pub success: bool,
    pub connection_id: i64,
}

/// List the caller's accepted connections.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ConnectionResponse>>> {
    let connections = state.connection_service.list_accepted(user.id).await?;

    Ok(ApiResponse::ok(
        connections.into_iter().map(Into::into).collect(),
    ))
}

/// List pending requests sent to the caller.
async fn pending(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ConnectionResponse>>> {
    let connections = state.connection_service.list_pending(user.id).await?;

    Ok(ApiResponse::ok(
        connections.into_iter().map(Into::into).collect(),
    ))
}

/// Request a connection to another user.
async fn request(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RequestConnectionInput>,
) -> AppResult<ApiResponse<RequestConnectionResponse>> {
    let connection = state.connection_service.request(user.id, input).await?;

    Ok(ApiResponse::ok(RequestConnectionResponse {
        success: true,
        connection_id: connection.id,
    }))
}

/// Accept or reject a pending request.
async fn update_status(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RespondConnectionInput>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state.connection_service.respond(user.id, input).await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/pending", post(pending))
        .route("/request", post(request))
        .route("/update-status", post(update_status))
}
