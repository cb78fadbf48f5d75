//! Page widget endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::AppResult;
use nexus_core::{CreateWidgetInput, UpdateWidgetInput};
use nexus_db::entities::widget::{self, WidgetRect};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, SuccessResponse},
};

/// Widget response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetResponse {
    pub id: i64,
    pub page_id: i64,
    #[serde(rename = "type")]
    pub widget_type: String,
    pub position: WidgetRect,
    pub config: Option<serde_json::Value>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<widget::Model> for WidgetResponse {
    fn from(w: widget::Model) -> Self {
        Self {
            id: w.id,
            page_id: w.page_id,
            widget_type: w.widget_type,
            position: w.position,
            config: w.config,
            created_at: w.created_at.to_rfc3339(),
            updated_at: w.updated_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// List widgets request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWidgetsRequest {
    pub page_id: i64,
}

/// Delete widget request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteWidgetRequest {
    pub widget_id: i64,
}

/// Create widget response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWidgetResponse {
    pub success: bool,
    pub widget_id: i64,
}

/// List widgets on one of the caller's pages.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListWidgetsRequest>,
) -> AppResult<ApiResponse<Vec<WidgetResponse>>> {
    let widgets = state.page_service.list_widgets(user.id, req.page_id).await?;

    Ok(ApiResponse::ok(
        widgets.into_iter().map(Into::into).collect(),
    ))
}

/// Place a widget on a page.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWidgetInput>,
) -> AppResult<ApiResponse<CreateWidgetResponse>> {
    let widget = state.page_service.create_widget(user.id, input).await?;

    Ok(ApiResponse::ok(CreateWidgetResponse {
        success: true,
        widget_id: widget.id,
    }))
}

/// Update a widget.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateWidgetInput>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state.page_service.update_widget(user.id, input).await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

/// Remove a widget from its page.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteWidgetRequest>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state
        .page_service
        .delete_widget(user.id, req.widget_id)
        .await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/create", post(create))
        .route("/update", post(update))
        .route("/delete", post(delete))
}
