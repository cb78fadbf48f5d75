//! Feature flag endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::{AppError, AppResult};
use nexus_core::{CreateFlagInput, UpdateFlagInput};
use nexus_db::entities::feature_flag;
use nexus_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, SuccessResponse},
};

/// Feature flag response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub enabled: bool,
    pub rollout_percentage: i32,
    pub target_user_ids: Option<Vec<i64>>,
    pub created_at: String,
}

impl From<feature_flag::Model> for FlagResponse {
    fn from(f: feature_flag::Model) -> Self {
        Self {
            id: f.id,
            name: f.name,
            description: f.description,
            enabled: f.enabled,
            rollout_percentage: f.rollout_percentage,
            target_user_ids: f.target_user_ids.map(|ids| ids.0),
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

/// Check flag request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckFlagRequest {
    pub name: String,
}

/// Check flag response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckFlagResponse {
    pub enabled: bool,
}

/// Create flag response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlagResponse {
    pub success: bool,
    pub flag_id: i64,
}

fn require_admin(user: &user::Model) -> AppResult<()> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}

/// List all flags. Admin only.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<FlagResponse>>> {
    require_admin(&user)?;

    let flags = state.feature_flag_service.list().await?;

    Ok(ApiResponse::ok(flags.into_iter().map(Into::into).collect()))
}

/// Check whether a flag is enabled for the caller.
async fn check(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CheckFlagRequest>,
) -> AppResult<ApiResponse<CheckFlagResponse>> {
    let enabled = state
        .feature_flag_service
        .is_enabled(&req.name, user.id)
        .await?;

    Ok(ApiResponse::ok(CheckFlagResponse { enabled }))
}

/// Create a flag. Admin only.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateFlagInput>,
) -> AppResult<ApiResponse<CreateFlagResponse>> {
    require_admin(&user)?;

    let flag = state.feature_flag_service.create(input).await?;

    Ok(ApiResponse::ok(CreateFlagResponse {
        success: true,
        flag_id: flag.id,
    }))
}

/// Update a flag. Admin only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateFlagInput>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    require_admin(&user)?;

    state.feature_flag_service.update(input).await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/check", post(check))
        .route("/create", post(create))
        .route("/update", post(update))
}
