use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use cfcgs_tracker::shared::infrastructure::database::seeding::seed_geography;
use cfcgs_tracker::shared::infrastructure::database::{connect, migrate};
use cfcgs_tracker::shell::config::{Cli, Command, DatabaseOptions, ServeOptions};
use cfcgs_tracker::shell::http::router;
use cfcgs_tracker::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Migrate(options) => run_migrations(&options).await,
        Command::Serve(options) => serve(options).await,
    }
}

async fn run_migrations(options: &DatabaseOptions) -> anyhow::Result<()> {
    let pool = connect(&options.database_url, options.database_max_connections)
        .await
        .with_context(|| format!("failed to open {}", options.database_url))?;
    migrate(&pool).await.context("failed to apply migrations")?;
    tracing::info!(database_url = %options.database_url, "migrations applied");
    pool.close().await;
    Ok(())
}

async fn serve(options: ServeOptions) -> anyhow::Result<()> {
    let database = &options.database;
    let pool = connect(&database.database_url, database.database_max_connections)
        .await
        .with_context(|| format!("failed to open {}", database.database_url))?;

    let seeded = seed_geography(&pool).await.context("failed to seed regions and countries")?;
    tracing::info!(
        regions_created = seeded.regions_created,
        countries_created = seeded.countries_created,
        "reference geography ready"
    );

    let state = AppState::sqlite(pool.clone(), options.upload_settings());
    let app = router(state, options.max_upload_bytes());

    let address = options.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(%address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
