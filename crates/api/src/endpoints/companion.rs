//! AI companion endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::AppResult;
use nexus_core::{ChatInput, UpdateCompanionInput};
use nexus_db::entities::companion::{self, VoiceMode};
use serde::Serialize;

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, SuccessResponse},
};

/// Companion response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub avatar_type: String,
    pub voice_mode: VoiceMode,
    pub personality_config: Option<serde_json::Value>,
    pub onboarding_progress: Option<serde_json::Value>,
    pub preferences: Option<serde_json::Value>,
    pub created_at: String,
}

impl From<companion::Model> for CompanionResponse {
    fn from(c: companion::Model) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            name: c.name,
            avatar_type: c.avatar_type,
            voice_mode: c.voice_mode,
            personality_config: c.personality_config,
            onboarding_progress: c.onboarding_progress,
            preferences: c.preferences,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Chat response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
}

/// Get the caller's companion, creating it on first fetch.
async fn get(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<CompanionResponse>> {
    let companion = state.companion_service.get_or_create(user.id).await?;

    Ok(ApiResponse::ok(companion.into()))
}

/// Update companion settings.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateCompanionInput>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state.companion_service.update(user.id, input).await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

/// Chat with the companion. The reply is a canned greeting for now.
async fn chat(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ChatInput>,
) -> AppResult<ApiResponse<ChatResponse>> {
    let reply = state.companion_service.chat(user.id, input).await?;

    Ok(ApiResponse::ok(ChatResponse { reply }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get", post(get))
        .route("/update", post(update))
        .route("/chat", post(chat))
}
