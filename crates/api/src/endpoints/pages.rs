//! Page endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::AppResult;
use nexus_core::{CreatePageInput, UpdatePageInput};
use nexus_db::entities::page::{self, PageType, PageVisibility};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, SuccessResponse},
};

/// Page response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub page_type: PageType,
    pub visibility: PageVisibility,
    pub layout_config: Option<serde_json::Value>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<page::Model> for PageResponse {
    fn from(p: page::Model) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            name: p.name,
            page_type: p.page_type,
            visibility: p.visibility,
            layout_config: p.layout_config,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Show page request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPageRequest {
    pub page_id: i64,
}

/// Delete page request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePageRequest {
    pub page_id: i64,
}

/// Create page response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageResponse {
    pub success: bool,
    pub page_id: i64,
}

/// List the caller's pages.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<PageResponse>>> {
    let pages = state.page_service.list(user.id).await?;

    Ok(ApiResponse::ok(pages.into_iter().map(Into::into).collect()))
}

/// Get one of the caller's pages.
async fn get(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<GetPageRequest>,
) -> AppResult<ApiResponse<PageResponse>> {
    let page = state.page_service.get_owned(req.page_id, user.id).await?;

    Ok(ApiResponse::ok(page.into()))
}

/// Create a page.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePageInput>,
) -> AppResult<ApiResponse<CreatePageResponse>> {
    let page = state.page_service.create(user.id, input).await?;

    Ok(ApiResponse::ok(CreatePageResponse {
        success: true,
        page_id: page.id,
    }))
}

/// Update a page.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdatePageInput>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state.page_service.update(user.id, input).await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

/// Delete a page and the widgets on it.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeletePageRequest>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state.page_service.delete(user.id, req.page_id).await?;

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
