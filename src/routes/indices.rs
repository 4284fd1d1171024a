use crate::error::ConsoleError;
use crate::models::requests::{ConfirmParams, CreateIndexRequest};
use crate::models::responses::{IndexListResponse, IndexNamesResponse};
use crate::routes::require_confirmation;
use crate::state::AppState;
use crate::utils::index_name::validate_index_name;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;

/// Preselected in the search view when present.
pub const PRIMARY_INDEX: &str = "my_score_g7";

pub fn default_index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "title": { "type": "text" },
                "content": { "type": "text" },
                "created_at": { "type": "date" }
            }
        }
    })
}

async fn fetch_listing(state: &AppState) -> Result<IndexListResponse, ConsoleError> {
    let indices = state.engine.get_indices().await?;
    Ok(IndexListResponse {
        count: indices.len(),
        indices,
    })
}

pub async fn list_indices(
    State(state): State<AppState>,
) -> Result<Json<IndexListResponse>, ConsoleError> {
    Ok(Json(fetch_listing(&state).await?))
}

pub async fn list_index_names(
    State(state): State<AppState>,
) -> Result<Json<IndexNamesResponse>, ConsoleError> {
    let indices: Vec<String> = state
        .engine
        .get_indices()
        .await?
        .into_iter()
        .map(|summary| summary.index)
        .collect();

    let selected = if indices.iter().any(|name| name == PRIMARY_INDEX) {
        Some(PRIMARY_INDEX.to_string())
    } else {
        indices.first().cloned()
    };

    Ok(Json(IndexNamesResponse { indices, selected }))
}

pub async fn create_index(
    State(state): State<AppState>,
    Json(request): Json<CreateIndexRequest>,
) -> Result<Json<IndexListResponse>, ConsoleError> {
    let name = request.name.trim();
    validate_index_name(name).map_err(ConsoleError::Invalid)?;

    info!("Creating index {}", name);
    state
        .engine
        .create_index(name, &default_index_mapping())
        .await?;

    Ok(Json(fetch_listing(&state).await?))
}

pub async fn delete_index(
    State(state): State<AppState>,
    Path(index): Path<String>,
    Query(params): Query<ConfirmParams>,
) -> Result<Json<IndexListResponse>, ConsoleError> {
    require_confirmation(
        &params,
        format!("Are you sure you want to delete the index \"{}\"?", index),
    )?;

    info!("Deleting index {}", index);
    state.engine.delete_index(&index).await?;

    Ok(Json(fetch_listing(&state).await?))
}

pub async fn get_mapping(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<Value>, ConsoleError> {
    Ok(Json(state.engine.get_mapping(&index).await?))
}
