use crate::models::responses::{ConnectionResponse, HealthResponse};
use crate::state::AppState;
use axum::{extract::State, response::Json};
use tracing::warn;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "elastic-console".to_string(),
        status: "running".to_string(),
    })
}

/// One cluster-health call; failure is reported as "disconnected", not as an error status.
pub async fn cluster_health(State(state): State<AppState>) -> Json<ConnectionResponse> {
    let api_key_configured = state.engine.has_api_key();

    match state.engine.check_health().await {
        Ok(cluster) => Json(ConnectionResponse {
            connected: true,
            cluster: Some(cluster),
            error: None,
            api_key_configured,
        }),
        Err(e) => {
            warn!("Search engine unreachable: {}", e);
            Json(ConnectionResponse {
                connected: false,
                cluster: None,
                error: Some(e.to_string()),
                api_key_configured,
            })
        }
    }
}
