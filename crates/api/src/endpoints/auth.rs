//! Authentication endpoints.
//!
//! Session issuance lives with the external OAuth collaborator; these
//! endpoints only resolve and clear the identity it established.

use axum::{Json, Router, extract::State, http::HeaderMap, routing::post};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use nexus_common::{AppError, AppResult};
use nexus_core::SyncUserInput;
use serde::Serialize;

use crate::{
    endpoints::users::UserResponse, extractors::MaybeAuthUser, middleware::AppState,
    response::ApiResponse,
};

/// Header carrying the shared secret the OAuth callback authenticates with.
const SYNC_SECRET_HEADER: &str = "x-sync-secret";

/// Upsert a user's account from the verified OAuth identity.
///
/// Only the OAuth callback may call this; it proves itself with the
/// configured shared secret. Without that guard an anonymous caller could
/// rebind any account's session token.
async fn sync(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<SyncUserInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let presented = headers
        .get(SYNC_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());
    match (state.sync_secret.as_deref(), presented) {
        (Some(secret), Some(given)) if secret == given => {}
        _ => return Err(AppError::Unauthorized),
    }

    let user = state.user_service.sync(input).await?;

    Ok(ApiResponse::ok(user.into()))
}

/// Return the resolved caller, or null when unauthenticated.
async fn me(MaybeAuthUser(user): MaybeAuthUser) -> ApiResponse<Option<UserResponse>> {
    ApiResponse::ok(user.map(Into::into))
}

/// Logout response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub success: bool,
}

/// End the caller's session and clear the session cookie.
async fn logout(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, ApiResponse<LogoutResponse>)> {
    if let Some(user) = user {
        state.user_service.logout(user.id).await?;
    }

    // Emit an expired removal cookie unconditionally so bearer-authenticated
    // logouts clear the cookie too, not just requests that sent it.
    let mut removal = Cookie::new(state.session_cookie.clone(), "");
    removal.set_path("/");
    removal.make_removal();
    let jar = jar.add(removal);

    Ok((jar, ApiResponse::ok(LogoutResponse { success: true })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sync", post(sync))
        .route("/me", post(me))
        .route("/logout", post(logout))
}
