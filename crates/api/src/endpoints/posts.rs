//! Post endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::AppResult;
use nexus_core::CreatePostInput;
use nexus_db::entities::post::{self, PostType};
use nexus_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::users::AuthorSummary,
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, SuccessResponse},
};

/// Post response, with the author joined in.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub community_id: i64,
    pub author_id: i64,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub media_urls: Option<serde_json::Value>,
    pub reaction_count: i64,
    pub reply_count: i64,
    pub created_at: String,
    pub author: Option<AuthorSummary>,
}

impl From<(post::Model, Option<user::Model>)> for PostResponse {
    fn from((p, author): (post::Model, Option<user::Model>)) -> Self {
        Self {
            id: p.id,
            community_id: p.community_id,
            author_id: p.author_id,
            content: p.content,
            post_type: p.post_type,
            media_urls: p.media_urls,
            reaction_count: p.reaction_count,
            reply_count: p.reply_count,
            created_at: p.created_at.to_rfc3339(),
            author: author.map(Into::into),
        }
    }
}

/// List posts request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsRequest {
    pub community_id: i64,
    pub limit: Option<u64>,
}

/// Delete post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostRequest {
    pub post_id: i64,
}

/// Create post response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub success: bool,
    pub post_id: i64,
}

/// List posts in a community, newest first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListPostsRequest>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state
        .post_service
        .list_with_authors(req.community_id, req.limit)
        .await?;

    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

/// Create a post.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePostInput>,
) -> AppResult<ApiResponse<CreatePostResponse>> {
    let post = state.post_service.create(user.id, input).await?;

    Ok(ApiResponse::ok(CreatePostResponse {
        success: true,
        post_id: post.id,
    }))
}

/// Delete a post.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeletePostRequest>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state.post_service.delete(user.id, req.post_id).await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/create", post(create))
        .route("/delete", post(delete))
}
