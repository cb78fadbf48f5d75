//! API endpoints.

mod auth;
mod communities;
mod community_widgets;
mod companion;
mod connections;
mod events;
mod feature_flags;
mod pages;
mod posts;
mod reactions;
mod thread_replies;
mod threads;
mod users;
mod widgets;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/pages", pages::router())
        .nest("/widgets", widgets::router())
        .nest("/communities", communities::router())
        .nest("/posts", posts::router())
        .nest("/connections", connections::router())
        .nest("/companion", companion::router())
        .nest("/feature-flags", feature_flags::router())
        .nest("/threads", threads::router())
        .nest("/thread-replies", thread_replies::router())
        .nest("/reactions", reactions::router())
        .nest("/community-widgets", community_widgets::router())
        .nest("/events", events::router())
}
