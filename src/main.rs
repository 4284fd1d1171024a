use elastic_console::{
    app,
    config::{Config, CredentialBackend},
    models::credential::{FileCredentialStore, MemoryCredentialStore, RedisCredentialStore},
    services::elasticsearch::ElasticsearchClient,
    state::{AppState, Credentials, Engine},
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("elastic_console=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    let credentials: Credentials = match &config.credential_backend {
        CredentialBackend::Redis(redis_url) => {
            info!("Using Redis credential store");
            match RedisCredentialStore::new(redis_url) {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    error!("Failed to open Redis credential store: {}", e);
                    std::process::exit(1);
                }
            }
        }
        CredentialBackend::Memory => {
            info!("Using in-memory credential store");
            Arc::new(MemoryCredentialStore::default())
        }
        CredentialBackend::File(path) => {
            info!("Using credential file {}", path.display());
            Arc::new(FileCredentialStore::new(path))
        }
    };

    let engine: Engine = Arc::new(ElasticsearchClient::new(&config.elasticsearch_url));
    let state = AppState::new(engine, credentials);
    state.restore_credential().await;

    match state.engine.check_health().await {
        Ok(health) => info!(
            "Connected to {} (cluster status: {})",
            config.elasticsearch_url,
            health.get("status").and_then(|s| s.as_str()).unwrap_or("unknown")
        ),
        Err(e) => warn!(
            "Not connected to {}: {}. Make sure the engine is running and the API key is valid.",
            config.elasticsearch_url, e
        ),
    }

    let addr = config.listen_addr();
    info!("Elastic console starting on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app(state)).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
