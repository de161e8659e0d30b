use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use listdesk_api::background;
use listdesk_api::config::ServerConfig;
use listdesk_api::router::build_app_router;
use listdesk_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listdesk_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");
    log_integrations(&config);

    // --- Database ---
    let pool = match config.database_url.as_deref() {
        Some(url) => {
            let pool = listdesk_db::create_pool(url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            listdesk_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");
            Some(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; listing and offer endpoints will fail");
            None
        }
    };

    // --- App state ---
    let state = AppState::from_config(config.clone(), pool);

    // --- Rate limit sweep ---
    let sweep_cancel = tokio_util::sync::CancellationToken::new();
    let sweep_handle = tokio::spawn(background::rate_limit_sweep::run(
        Arc::clone(&state.rate_limiter),
        Duration::from_secs(config.rate_limit.sweep_secs.max(1)),
        sweep_cancel.clone(),
    ));

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweep_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;
    tracing::info!("Rate limit sweep stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Report which integrations are usable with the loaded credentials.
fn log_integrations(config: &ServerConfig) {
    tracing::info!(
        vaultre = config.vaultre.is_some(),
        gemini_model = config.gemini.as_ref().map(|g| g.model.as_str()),
        webhook = config.workflow_webhook_url.is_some(),
        chat = config.chat.api_key.is_some() && config.chat.workflow_id.is_some(),
        rate_limit_max = config.rate_limit.max_requests,
        rate_limit_window_secs = config.rate_limit.window_secs,
        "Integrations configured"
    );
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
