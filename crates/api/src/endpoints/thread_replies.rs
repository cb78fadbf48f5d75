//! Thread reply endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::AppResult;
use nexus_core::CreateReplyInput;
use nexus_db::entities::{thread_reply, user};
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::users::AuthorSummary,
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, SuccessResponse},
};

/// Reply response, with the author joined in.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResponse {
    pub id: i64,
    pub thread_id: i64,
    pub author_id: i64,
    pub parent_reply_id: Option<i64>,
    pub content: String,
    pub depth: i32,
    pub reaction_count: i64,
    pub created_at: String,
    pub author: Option<AuthorSummary>,
}

impl From<(thread_reply::Model, Option<user::Model>)> for ReplyResponse {
    fn from((r, author): (thread_reply::Model, Option<user::Model>)) -> Self {
        Self {
            id: r.id,
            thread_id: r.thread_id,
            author_id: r.author_id,
            parent_reply_id: r.parent_reply_id,
            content: r.content,
            depth: r.depth,
            reaction_count: r.reaction_count,
            created_at: r.created_at.to_rfc3339(),
            author: author.map(Into::into),
        }
    }
}

/// List replies request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRepliesRequest {
    pub thread_id: i64,
}

/// Delete reply request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReplyRequest {
    pub reply_id: i64,
}

/// Create reply response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyResponse {
    pub success: bool,
    pub reply_id: i64,
}

/// List replies in a thread, oldest first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListRepliesRequest>,
) -> AppResult<ApiResponse<Vec<ReplyResponse>>> {
    let replies = state
        .thread_service
        .list_replies_with_authors(req.thread_id)
        .await?;

    Ok(ApiResponse::ok(
        replies.into_iter().map(Into::into).collect(),
    ))
}

/// Create a reply.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReplyInput>,
) -> AppResult<ApiResponse<CreateReplyResponse>> {
    let reply = state.thread_service.create_reply(user.id, input).await?;

    Ok(ApiResponse::ok(CreateReplyResponse {
        success: true,
        reply_id: reply.id,
    }))
}

/// Delete a reply.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteReplyRequest>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state
        .thread_service
        .delete_reply(user.id, user.role.is_admin(), req.reply_id)
        .await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/create", post(create))
        .route("/delete", post(delete))
}
