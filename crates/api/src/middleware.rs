//! API middleware.

#![allow(missing_docs)]

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use nexus_core::{
    CommunityService, CommunityWidgetService, CompanionService, ConnectionService, EventService,
    FeatureFlagService, PageService, PostService, ReactionService, ThreadService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub page_service: PageService,
    pub community_service: CommunityService,
    pub post_service: PostService,
    pub connection_service: ConnectionService,
    pub companion_service: CompanionService,
    pub feature_flag_service: FeatureFlagService,
    pub event_service: EventService,
    pub thread_service: ThreadService,
    pub reaction_service: ReactionService,
    pub community_widget_service: CommunityWidgetService,
    pub session_cookie: String,
    pub sync_secret: Option<String>,
}

/// Authentication middleware.
///
/// Resolves the session token from the `Authorization: Bearer` header, falling
/// back to the session cookie, and stores the matching user in the request
/// extensions for the extractors.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&req).or_else(|| session_cookie(&req, &state.session_cookie))
        && let Ok(Some(user)) = state.user_service.find_by_session_token(&token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}

fn bearer_token(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

fn session_cookie(req: &Request<Body>, name: &str) -> Option<String> {
    let cookies = req.headers().get("Cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}
