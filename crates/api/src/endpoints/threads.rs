//! Discussion thread endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::AppResult;
use nexus_core::{CreateThreadInput, UpdateThreadInput};
use nexus_db::entities::{thread, user};
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::users::AuthorSummary,
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, SuccessResponse},
};

/// Thread response, with the author joined in.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub id: i64,
    pub community_id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub reply_count: i64,
    pub view_count: i64,
    pub last_activity_at: String,
    pub created_at: String,
    pub author: Option<AuthorSummary>,
}

impl From<(thread::Model, Option<user::Model>)> for ThreadResponse {
    fn from((t, author): (thread::Model, Option<user::Model>)) -> Self {
        Self {
            id: t.id,
            community_id: t.community_id,
            author_id: t.author_id,
            title: t.title,
            content: t.content,
            is_pinned: t.is_pinned,
            reply_count: t.reply_count,
            view_count: t.view_count,
            last_activity_at: t.last_activity_at.to_rfc3339(),
            created_at: t.created_at.to_rfc3339(),
            author: author.map(Into::into),
        }
    }
}

impl From<thread::Model> for ThreadResponse {
    fn from(t: thread::Model) -> Self {
        (t, None).into()
    }
}

/// List threads request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListThreadsRequest {
    pub community_id: i64,
    pub limit: Option<u64>,
}

/// Show thread request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetThreadRequest {
    pub thread_id: i64,
}

/// Delete thread request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteThreadRequest {
    pub thread_id: i64,
}

/// Create thread response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadResponse {
    pub success: bool,
    pub thread_id: i64,
}

/// List threads in a community, pinned first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListThreadsRequest>,
) -> AppResult<ApiResponse<Vec<ThreadResponse>>> {
    let threads = state
        .thread_service
        .list_with_authors(req.community_id, req.limit)
        .await?;

    Ok(ApiResponse::ok(
        threads.into_iter().map(Into::into).collect(),
    ))
}

/// Show a thread. Each fetch counts a view.
async fn get(
    State(state): State<AppState>,
    Json(req): Json<GetThreadRequest>,
) -> AppResult<ApiResponse<ThreadResponse>> {
    let thread = state
        .thread_service
        .get_and_record_view(req.thread_id)
        .await?;

    Ok(ApiResponse::ok(thread.into()))
}

/// Create a thread.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateThreadInput>,
) -> AppResult<ApiResponse<CreateThreadResponse>> {
    let thread = state.thread_service.create(user.id, input).await?;

    Ok(ApiResponse::ok(CreateThreadResponse {
        success: true,
        thread_id: thread.id,
    }))
}

/// Update a thread.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateThreadInput>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state
        .thread_service
        .update(user.id, user.role.is_admin(), input)
        .await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

/// Delete a thread and its replies.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteThreadRequest>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state
        .thread_service
        .delete(user.id, user.role.is_admin(), req.thread_id)
        .await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/get", post(get))
        .route("/create", post(create))
        .route("/update", post(update))
        .route("/delete", post(delete))
}
