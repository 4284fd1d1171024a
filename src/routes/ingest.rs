use crate::error::ConsoleError;
use crate::models::requests::IngestRequest;
use crate::models::responses::IngestionResult;
use crate::services::ingestion::{self, sample_data};
use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde_json::Value;

pub async fn ingest_data(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestionResult>, ConsoleError> {
    let result = ingestion::ingest(state.engine.as_ref(), &request).await?;
    Ok(Json(result))
}

pub async fn sample() -> Json<Value> {
    Json(sample_data())
}
