use crate::error::ConsoleError;
use crate::models::requests::ConfirmParams;
use crate::models::responses::{DocumentListResponse, DocumentSummary};
use crate::routes::require_confirmation;
use crate::services::query::{match_all_query, DEFAULT_RESULT_SIZE};
use crate::state::AppState;
use crate::utils::json::value_preview;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;
use tracing::info;

async fn fetch_documents(
    state: &AppState,
    index: &str,
) -> Result<DocumentListResponse, ConsoleError> {
    let response = state
        .engine
        .search(index, &match_all_query(DEFAULT_RESULT_SIZE))
        .await?;

    let documents: Vec<DocumentSummary> = response
        .hits
        .hits
        .into_iter()
        .map(|hit| DocumentSummary {
            preview: value_preview(&hit.source),
            id: hit.id,
            index: hit.index,
            version: hit.version,
            source: hit.source,
        })
        .collect();

    Ok(DocumentListResponse {
        index: index.to_string(),
        count: documents.len(),
        documents,
    })
}

pub async fn list_documents(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<DocumentListResponse>, ConsoleError> {
    Ok(Json(fetch_documents(&state, &index).await?))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path((index, id)): Path<(String, String)>,
) -> Result<Json<Value>, ConsoleError> {
    Ok(Json(state.engine.get_document(&index, &id).await?))
}

/// Body is taken as text so a parse failure gets the console's own message.
pub async fn put_document(
    State(state): State<AppState>,
    Path((index, id)): Path<(String, String)>,
    body: String,
) -> Result<Json<DocumentListResponse>, ConsoleError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ConsoleError::Invalid("Document ID is required".to_string()));
    }
    let document: Value = serde_json::from_str(&body).map_err(|_| {
        ConsoleError::Invalid("Error creating document. Please check the JSON format.".to_string())
    })?;

    info!("Indexing document {} into {}", id, index);
    state.engine.index_document(&index, id, &document).await?;

    Ok(Json(fetch_documents(&state, &index).await?))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path((index, id)): Path<(String, String)>,
    Query(params): Query<ConfirmParams>,
) -> Result<Json<DocumentListResponse>, ConsoleError> {
    require_confirmation(
        &params,
        format!("Are you sure you want to delete document \"{}\"?", id),
    )?;

    info!("Deleting document {} from {}", id, index);
    state.engine.delete_document(&index, &id).await?;

    Ok(Json(fetch_documents(&state, &index).await?))
}
