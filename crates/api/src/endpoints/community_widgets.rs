//! Community widget endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::AppResult;
use nexus_core::{CreateCommunityWidgetInput, UpdateCommunityWidgetInput};
use nexus_db::entities::{community_template, community_widget};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, SuccessResponse},
};

/// Community widget response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityWidgetResponse {
    pub id: i64,
    pub community_id: i64,
    #[serde(rename = "type")]
    pub widget_type: String,
    pub title: String,
    pub content: Option<String>,
    pub position: i32,
    pub is_visible: bool,
    pub created_by: i64,
    pub created_at: String,
}

impl From<community_widget::Model> for CommunityWidgetResponse {
    fn from(w: community_widget::Model) -> Self {
        Self {
            id: w.id,
            community_id: w.community_id,
            widget_type: w.widget_type,
            title: w.title,
            content: w.content,
            position: w.position,
            is_visible: w.is_visible,
            created_by: w.created_by,
            created_at: w.created_at.to_rfc3339(),
        }
    }
}

/// Community template response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: community_template::TemplateCategory,
    pub widget_config: Option<serde_json::Value>,
    pub created_at: String,
}

impl From<community_template::Model> for TemplateResponse {
    fn from(t: community_template::Model) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            category: t.category,
            widget_config: t.widget_config,
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

/// List widgets request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommunityWidgetsRequest {
    pub community_id: i64,
}

/// Delete widget request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommunityWidgetRequest {
    pub widget_id: i64,
}

/// Create widget response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunityWidgetResponse {
    pub success: bool,
    pub widget_id: i64,
}

/// List visible widgets in a community, ordered by position.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListCommunityWidgetsRequest>,
) -> AppResult<ApiResponse<Vec<CommunityWidgetResponse>>> {
    let widgets = state
        .community_widget_service
        .list_visible(req.community_id)
        .await?;

    Ok(ApiResponse::ok(
        widgets.into_iter().map(Into::into).collect(),
    ))
}

/// Add a widget to a community. Moderators only.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCommunityWidgetInput>,
) -> AppResult<ApiResponse<CreateCommunityWidgetResponse>> {
    let widget = state
        .community_widget_service
        .create(user.id, input)
        .await?;

    Ok(ApiResponse::ok(CreateCommunityWidgetResponse {
        success: true,
        widget_id: widget.id,
    }))
}

/// Update a community widget. Moderators only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateCommunityWidgetInput>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state
        .community_widget_service
        .update(user.id, input)
        .await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

/// Remove a community widget. Moderators only.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteCommunityWidgetRequest>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state
        .community_widget_service
        .delete(user.id, req.widget_id)
        .await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

/// List public layout templates.
async fn templates(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<TemplateResponse>>> {
    let templates = state.community_widget_service.list_templates().await?;

    Ok(ApiResponse::ok(
        templates.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/create", post(create))
        .route("/update", post(update))
        .route("/delete", post(delete))
        .route("/templates", post(templates))
}
