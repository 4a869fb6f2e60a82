//! Suggestbox server entry point.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{Router, http::HeaderValue, middleware};
use suggestbox_api::{middleware::AppState, router as api_router};
use suggestbox_common::{Config, VapidSigner};
use suggestbox_core::{AdminService, PushNotificationService, SuggestionService};
use suggestbox_db::repositories::{
    AdminRepository, PushSubscriptionRepository, SuggestionRepository,
};
use tokio::signal;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
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
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "suggestbox=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting suggestbox server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = suggestbox_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    suggestbox_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let admin_repo = AdminRepository::new(Arc::clone(&db));
    let suggestion_repo = SuggestionRepository::new(Arc::clone(&db));
    let push_repo = PushSubscriptionRepository::new(Arc::clone(&db));

    // VAPID keys are optional; a malformed key is a hard startup error
    let signer = if config.push.is_configured() {
        Some(VapidSigner::new(
            config.push.vapid_public_key.clone(),
            &config.push.vapid_private_key,
        )?)
    } else {
        warn!("VAPID keys not configured; push notifications are disabled");
        None
    };

    // Initialize services
    let admin_service = AdminService::new(admin_repo, &config);
    let push_service = PushNotificationService::new(push_repo, signer);
    let suggestion_service = SuggestionService::new(suggestion_repo, push_service.clone());

    // Create app state
    let state = AppState {
        admin_service,
        suggestion_service,
        push_service,
    };

    // Build router
    let mut app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            suggestbox_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // CORS only when origins are configured
    let origins = config.server.cors_origin_list();
    if !origins.is_empty() {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        app = app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any),
        );
        info!("CORS enabled");
    }

    // Static frontend with SPA fallback
    if let Some(dir) = &config.server.public_dir {
        let public_dir = Path::new(dir);
        if public_dir.is_dir() {
            let index = public_dir.join("index.html");
            app = app.fallback_service(ServeDir::new(public_dir).fallback(ServeFile::new(index)));
            info!(dir = %public_dir.display(), "Serving static files");
        } else {
            warn!(dir = %public_dir.display(), "Configured public_dir does not exist");
        }
    }

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
