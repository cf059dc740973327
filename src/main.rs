use library_circulation::{
    adapters::{
        memory::InMemoryStore,
        postgres::{self, PostgresCatalogStore, PostgresLoanLedger},
        qr::PngQrEncoder,
    },
    api::{handlers::AppState, router::create_router},
    application::circulation::ServiceDependencies,
    config::{AppConfig, StorageBackend},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 設定に従ってストアを組み立てる
async fn build_dependencies(config: &AppConfig) -> Result<ServiceDependencies, BoxError> {
    let qr_encoder = Arc::new(PngQrEncoder::new());
    let loan_period = config.loan_period();

    let deps = match config.storage.backend {
        StorageBackend::Postgres => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;

            postgres::run_migrations(&pool).await?;

            ServiceDependencies {
                catalog: Arc::new(PostgresCatalogStore::new(pool.clone())),
                ledger: Arc::new(PostgresLoanLedger::new(pool)),
                qr_encoder,
                loan_period,
            }
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            let store = Arc::new(InMemoryStore::new());
            ServiceDependencies {
                catalog: store.clone(),
                ledger: store,
                qr_encoder,
                loan_period,
            }
        }
    };

    Ok(deps)
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_circulation=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    tracing::info!(backend = ?config.storage.backend, "Configuration loaded");

    let service_deps = build_dependencies(&config).await?;

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
