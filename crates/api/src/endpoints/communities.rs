//! Community endpoints.

use axum::{Json, Router, extract::State, routing::post};
use nexus_common::AppResult;
use nexus_core::CreateCommunityInput;
use nexus_db::entities::community::{self, CommunityType, CommunityVisibility};
use nexus_db::entities::community_member::{self, MemberRole};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, SuccessResponse},
};

/// Community response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub community_type: CommunityType,
    pub visibility: CommunityVisibility,
    pub creator_id: i64,
    pub avatar_url: Option<String>,
    pub member_count: i64,
    pub created_at: String,
}

impl From<community::Model> for CommunityResponse {
    fn from(c: community::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            community_type: c.community_type,
            visibility: c.visibility,
            creator_id: c.creator_id,
            avatar_url: c.avatar_url,
            member_count: c.member_count,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Community with the caller's membership.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedCommunityResponse {
    #[serde(flatten)]
    pub community: CommunityResponse,
    pub role: MemberRole,
    pub joined_at: String,
}

impl From<(community::Model, community_member::Model)> for JoinedCommunityResponse {
    fn from((community, member): (community::Model, community_member::Model)) -> Self {
        Self {
            community: community.into(),
            role: member.role,
            joined_at: member.joined_at.to_rfc3339(),
        }
    }
}

/// List communities request.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListCommunitiesRequest {
    pub limit: Option<u64>,
}

/// Show community request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCommunityRequest {
    pub community_id: i64,
}

/// Join/leave request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequest {
    pub community_id: i64,
}

/// Create community response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunityResponse {
    pub success: bool,
    pub community_id: i64,
}

/// List public communities, most members first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListCommunitiesRequest>,
) -> AppResult<ApiResponse<Vec<CommunityResponse>>> {
    let communities = state.community_service.list_public(req.limit).await?;

    Ok(ApiResponse::ok(
        communities.into_iter().map(Into::into).collect(),
    ))
}

/// Show a community.
async fn get(
    State(state): State<AppState>,
    Json(req): Json<GetCommunityRequest>,
) -> AppResult<ApiResponse<CommunityResponse>> {
    let community = state.community_service.get_by_id(req.community_id).await?;

    Ok(ApiResponse::ok(community.into()))
}

/// List the caller's communities with role and join time.
async fn my(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<JoinedCommunityResponse>>> {
    let joined = state.community_service.list_joined(user.id).await?;

    Ok(ApiResponse::ok(
        joined.into_iter().map(Into::into).collect(),
    ))
}

/// Create a community. The caller becomes the owner.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCommunityInput>,
) -> AppResult<ApiResponse<CreateCommunityResponse>> {
    let community = state.community_service.create(user.id, input).await?;

    Ok(ApiResponse::ok(CreateCommunityResponse {
        success: true,
        community_id: community.id,
    }))
}

/// Join a community.
async fn join(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MembershipRequest>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state
        .community_service
        .join(req.community_id, user.id)
        .await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

/// Leave a community.
async fn leave(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MembershipRequest>,
) -> AppResult<ApiResponse<SuccessResponse>> {
    state
        .community_service
        .leave(req.community_id, user.id)
        .await?;

    Ok(ApiResponse::ok(SuccessResponse::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/get", post(get))
        .route("/my", post(my))
        .route("/create", post(create))
        .route("/join", post(join))
        .route("/leave", post(leave))
}
