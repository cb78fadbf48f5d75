//! API procedure tests.
//!
//! These tests drive the router over mock storage and check status codes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use nexus_api::{AppState, middleware::auth_middleware, router as api_router};
use nexus_core::{
    CommunityService, CommunityWidgetService, CompanionService, ConnectionService, EventService,
    FeatureFlagService, PageService, PostService, ReactionService, ThreadService, UserService,
};
use nexus_db::entities::user::{self, UserRole};
use nexus_db::repositories::{
    CommunityRepository, CommunityWidgetRepository, CompanionRepository, ConnectionRepository,
    EventRepository, FeatureFlagRepository, PageRepository, PostRepository, ReactionRepository,
    ThreadRepository, UserRepository,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;

const SESSION_COOKIE: &str = "nexus_session";
const SYNC_SECRET: &str = "callback-secret";

fn test_user(id: i64, role: UserRole) -> user::Model {
    user::Model {
        id,
        open_id: format!("open-{id}"),
        name: Some("Ada".to_string()),
        email: None,
        login_method: None,
        role,
        bio: None,
        avatar_url: None,
        preferences: None,
        session_token: Some("token".to_string()),
        last_signed_in: Utc::now().into(),
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

/// Wire the full state over a single mock connection.
fn state_for(db: DatabaseConnection) -> AppState {
    let db = Arc::new(db);

    let user_repo = UserRepository::new(Arc::clone(&db));
    let page_repo = PageRepository::new(Arc::clone(&db));
    let community_repo = CommunityRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let connection_repo = ConnectionRepository::new(Arc::clone(&db));
    let companion_repo = CompanionRepository::new(Arc::clone(&db));
    let flag_repo = FeatureFlagRepository::new(Arc::clone(&db));
    let event_repo = EventRepository::new(Arc::clone(&db));
    let thread_repo = ThreadRepository::new(Arc::clone(&db));
    let reaction_repo = ReactionRepository::new(Arc::clone(&db));
    let community_widget_repo = CommunityWidgetRepository::new(Arc::clone(&db));

    AppState {
        user_service: UserService::new(user_repo.clone(), None),
        page_service: PageService::new(page_repo),
        community_service: CommunityService::new(community_repo.clone()),
        post_service: PostService::new(post_repo.clone(), user_repo.clone()),
        connection_service: ConnectionService::new(connection_repo),
        companion_service: CompanionService::new(companion_repo, user_repo.clone()),
        feature_flag_service: FeatureFlagService::new(flag_repo),
        event_service: EventService::new(event_repo),
        thread_service: ThreadService::new(thread_repo.clone(), user_repo),
        reaction_service: ReactionService::new(reaction_repo, post_repo, thread_repo),
        community_widget_service: CommunityWidgetService::new(
            community_widget_repo,
            community_repo,
        ),
        session_cookie: SESSION_COOKIE.to_string(),
        sync_secret: Some(SYNC_SECRET.to_string()),
    }
}

/// Router with the auth middleware attached, as the server assembles it.
fn app_for(db: DatabaseConnection) -> Router {
    let state = state_for(db);
    api_router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

fn post_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_post_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .header("Authorization", "Bearer token")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_unknown_procedure_returns_404() {
    let app = app_for(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let response = app
        .oneshot(post_request("/nonexistent/endpoint", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_protected_procedure_without_token_returns_401() {
    // No session resolves, so the extractor rejects.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();
    let app = app_for(db);

    let response = app.oneshot(post_request("/pages/list", "{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_without_identity_returns_ok() {
    let app = app_for(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let response = app.oneshot(post_request("/auth/me", "{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_resolves_session_cookie() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_user(1, UserRole::User)]])
        .into_connection();
    let app = app_for(db);

    let request = Request::builder()
        .uri("/auth/me")
        .method("POST")
        .header("Content-Type", "application/json")
        .header("Cookie", format!("{SESSION_COOKIE}=token"))
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_communities_list_is_public() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<nexus_db::entities::community::Model>::new()])
        .into_connection();
    let app = app_for(db);

    let response = app
        .oneshot(post_request("/communities/list", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_flag_list_requires_admin() {
    // First query resolves the session to a regular user.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_user(1, UserRole::User)]])
        .into_connection();
    let app = app_for(db);

    let response = app
        .oneshot(authed_post_request("/feature-flags/list", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_flag_list_allows_admin() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_user(1, UserRole::Admin)]])
        .append_query_results([Vec::<nexus_db::entities::feature_flag::Model>::new()])
        .into_connection();
    let app = app_for(db);

    let response = app
        .oneshot(authed_post_request("/feature-flags/list", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_post_create_rejects_empty_content() {
    // Validation fails before any storage access beyond the session lookup.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_user(1, UserRole::User)]])
        .into_connection();
    let app = app_for(db);

    let response = app
        .oneshot(authed_post_request(
            "/posts/create",
            r#"{"communityId":1,"content":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_json_returns_client_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_user(1, UserRole::User)]])
        .into_connection();
    let app = app_for(db);

    let response = app
        .oneshot(authed_post_request("/posts/create", "not json"))
        .await
        .unwrap();

    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_thread_get_records_view() {
    let thread = nexus_db::entities::thread::Model {
        id: 7,
        community_id: 1,
        author_id: 1,
        title: "welcome".to_string(),
        content: "hello".to_string(),
        is_pinned: false,
        reply_count: 0,
        view_count: 3,
        last_activity_at: Utc::now().into(),
        created_at: Utc::now().into(),
        updated_at: None,
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[thread]])
        .append_exec_results([sea_orm::MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = app_for(db);

    let response = app
        .oneshot(post_request("/threads/get", r#"{"threadId":7}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_sync_without_secret_is_rejected() {
    // An anonymous caller must not be able to rebind a session token.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = app_for(db);

    let response = app
        .oneshot(post_request(
            "/auth/sync",
            r#"{"openId":"owner-1","sessionToken":"stolen-token"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sync_rejects_wrong_secret() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = app_for(db);

    let request = Request::builder()
        .uri("/auth/sync")
        .method("POST")
        .header("Content-Type", "application/json")
        .header("x-sync-secret", "guess")
        .body(Body::from(r#"{"openId":"owner-1"}"#.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sync_with_secret_upserts() {
    // No user matches the open id, so the sync inserts one.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .append_query_results([[test_user(1, UserRole::User)]])
        .into_connection();
    let app = app_for(db);

    let request = Request::builder()
        .uri("/auth/sync")
        .method("POST")
        .header("Content-Type", "application/json")
        .header("x-sync-secret", SYNC_SECRET)
        .body(Body::from(r#"{"openId":"open-1"}"#.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_clears_cookie_for_bearer_session() {
    // The request carries no Cookie header; the removal cookie must still
    // be emitted. The session lookup, the fetch before the token clear and
    // the update itself each consume a result set.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_user(1, UserRole::User)]])
        .append_query_results([[test_user(1, UserRole::User)]])
        .append_query_results([[test_user(1, UserRole::User)]])
        .into_connection();
    let app = app_for(db);

    let response = app
        .oneshot(authed_post_request("/auth/logout", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(set_cookie.contains(SESSION_COOKIE));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_reaction_add_requires_auth() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = app_for(db);

    let response = app
        .oneshot(post_request(
            "/reactions/add",
            r#"{"targetType":"post","targetId":1,"reactionType":"like"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
