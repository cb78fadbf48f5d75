//! User endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::AppResult;
use nexus_core::UpdateProfileInput;
use nexus_db::entities::user::{self, UserRole};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// User response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: UserRole,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub preferences: Option<serde_json::Value>,
    pub last_signed_in: String,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            open_id: u.open_id,
            name: u.name,
            email: u.email,
            role: u.role,
            bio: u.bio,
            avatar_url: u.avatar_url,
            preferences: u.preferences,
            last_signed_in: u.last_signed_in.to_rfc3339(),
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Compact author info joined onto listings.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: i64,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<user::Model> for AuthorSummary {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            avatar_url: u.avatar_url,
        }
    }
}

/// Get profile request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProfileRequest {
    /// Defaults to the caller.
    pub user_id: Option<i64>,
}

/// Get a user's profile.
async fn get_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<GetProfileRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let target = match req.user_id {
        Some(id) if id != user.id => state.user_service.get_by_id(id).await?,
        _ => user,
    };

    Ok(ApiResponse::ok(target.into()))
}

/// Update the caller's profile.
async fn update_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let updated = state.user_service.update_profile(user.id, input).await?;

    Ok(ApiResponse::ok(updated.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get-profile", post(get_profile))
        .route("/update-profile", post(update_profile))
}
