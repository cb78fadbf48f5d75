//! Nexus server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use nexus_api::{middleware::AppState, router as api_router};
use nexus_common::Config;
use nexus_core::{
    CommunityService, CommunityWidgetService, CompanionService, ConnectionService, EventService,
    FeatureFlagService, PageService, PostService, ReactionService, ThreadService, UserService,
};
use nexus_db::repositories::{
    CommunityRepository, CommunityWidgetRepository, CompanionRepository, ConnectionRepository,
    EventRepository, FeatureFlagRepository, PageRepository, PostRepository, ReactionRepository,
    ThreadRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nexus=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting nexus server...");

    let config = Config::load()?;

    let db = nexus_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    nexus_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
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

    // Initialize services
    let user_service = UserService::new(user_repo.clone(), config.auth.owner_open_id.clone());
    let page_service = PageService::new(page_repo);
    let community_service = CommunityService::new(community_repo.clone());
    let post_service = PostService::new(post_repo.clone(), user_repo.clone());
    let connection_service = ConnectionService::new(connection_repo);
    let companion_service = CompanionService::new(companion_repo, user_repo.clone());
    let feature_flag_service = FeatureFlagService::new(flag_repo);
    let event_service = EventService::new(event_repo);
    let thread_service = ThreadService::new(thread_repo.clone(), user_repo);
    let reaction_service = ReactionService::new(reaction_repo, post_repo, thread_repo);
    let community_widget_service =
        CommunityWidgetService::new(community_widget_repo, community_repo);

    let state = AppState {
        user_service,
        page_service,
        community_service,
        post_service,
        connection_service,
        companion_service,
        feature_flag_service,
        event_service,
        thread_service,
        reaction_service,
        community_widget_service,
        session_cookie: config.auth.session_cookie.clone(),
        sync_secret: config.auth.sync_secret.clone(),
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            nexus_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
