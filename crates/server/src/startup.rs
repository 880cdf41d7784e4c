use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, DatabaseConfig, LogFormat, LoggingConfig, StorageBackend};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use common::utils::logging::{init_logging_compact, init_logging_json};
use service::produto::repository::{mock::MockProdutoRepository, ProdutoRepository, SeaOrmProdutoRepository};

use crate::routes::{self, ServerState};

/// Install the tracing subscriber selected by `[logging]`.
pub fn init_logging(cfg: &LoggingConfig) {
    match cfg.format {
        LogFormat::Json => init_logging_json(cfg.filter.as_deref()),
        LogFormat::Compact => init_logging_compact(cfg.filter.as_deref()),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Pick the repository named by `[database].backend` and wrap it in handler state.
pub async fn build_state(cfg: &DatabaseConfig) -> anyhow::Result<ServerState> {
    let repo: Arc<dyn ProdutoRepository> = match cfg.backend {
        StorageBackend::Memory => {
            warn!("using in-memory produto storage; data is lost on restart");
            Arc::new(MockProdutoRepository::new())
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(cfg).await?;
            if cfg.run_migrations {
                migration::Migrator::up(&db, None).await?;
                info!("database migrations applied");
            }
            Arc::new(SeaOrmProdutoRepository { db })
        }
    };
    Ok(ServerState::with_repository(repo))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(build_cors(), state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: load config, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env()?;
    init_logging(&cfg.logging);
    run_with_config(cfg).await
}

/// Serve with an already loaded config until Ctrl+C.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg.database).await?;
    let app = build_app(state);

    let listener = TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, backend = ?cfg.database.backend, "starting catalogo server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
