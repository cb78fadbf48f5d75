//! Reaction endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::AppResult;
use nexus_core::ToggleReactionInput;
use nexus_db::entities::reaction::{self, ReactionTarget};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Reaction response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub id: i64,
    pub user_id: i64,
    pub target_type: ReactionTarget,
    pub target_id: i64,
    pub reaction_type: String,
    pub created_at: String,
}

impl From<reaction::Model> for ReactionResponse {
    fn from(r: reaction::Model) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            target_type: r.target_type,
            target_id: r.target_id,
            reaction_type: r.reaction_type,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Toggle response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub action: &'static str,
}

/// List reactions request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReactionsRequest {
    pub target_type: ReactionTarget,
    pub target_id: i64,
}

/// Toggle a reaction on a post, thread, or reply.
async fn add(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ToggleReactionInput>,
) -> AppResult<ApiResponse<ToggleResponse>> {
    let outcome = state.reaction_service.toggle(user.id, input).await?;

    Ok(ApiResponse::ok(ToggleResponse {
        action: outcome.as_str(),
    }))
}

/// List reactions on a target.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListReactionsRequest>,
) -> AppResult<ApiResponse<Vec<ReactionResponse>>> {
    let reactions = state
        .reaction_service
        .list_by_target(req.target_type, req.target_id)
        .await?;

    Ok(ApiResponse::ok(
        reactions.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add))
        .route("/list", post(list))
}
