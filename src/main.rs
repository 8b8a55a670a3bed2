use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use training_tracker::agents::GeminiClient;
use training_tracker::api::{create_routes, AppState};
use training_tracker::auth::JwtService;
use training_tracker::config::{run_migrations, AgentConfig, AppConfig, DatabaseConfig, StorageBackend};
use training_tracker::store::{InMemoryTrainingStore, PgTrainingStore, TrainingStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let store: Arc<dyn TrainingStore> = match config.storage_backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = db_config.create_pool().await?;
            run_migrations(&pool).await?;
            info!("Connected to Postgres, migrations applied");
            Arc::new(PgTrainingStore::new(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on restart");
            Arc::new(InMemoryTrainingStore::new())
        }
    };

    let agent_config = AgentConfig::from_env()?;
    if agent_config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; plan import and recommendations will fail");
    }
    let gemini = Arc::new(GeminiClient::new(&agent_config)?);

    let state = AppState::new(store, gemini.clone(), gemini, &config);
    let app = create_routes(state, JwtService::new(&config.jwt_secret));

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Training tracker starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
