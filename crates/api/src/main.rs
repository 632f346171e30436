use std::net::SocketAddr;
use std::sync::Arc;

use mealmax_api::config::ServerConfig;
use mealmax_api::router::build_app_router;
use mealmax_api::state::AppState;
use mealmax_battle::{BattleEngine, RandomOrgClient};
use mealmax_db::MealCatalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mealmax_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "Server exited with an error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = mealmax_db::create_pool(&config.database).await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        "Database connection pool created"
    );

    mealmax_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    mealmax_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    // --- Battle arena ---
    let random = RandomOrgClient::new(&config.random)?;
    tracing::info!(url = %config.random.url, "Random source configured");
    let engine = BattleEngine::new(
        Arc::new(MealCatalog::new(pool.clone())),
        Arc::new(random),
    );

    // --- Router ---
    let state = AppState::new(pool, config.clone(), engine);
    let app = build_app_router(state, &config)?;

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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
