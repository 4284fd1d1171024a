use crate::models::requests::IngestRequest;
use crate::models::responses::IngestionResult;
use crate::services::elasticsearch::{SearchEngine, TransportError};
use crate::utils::index_name::validate_index_name;
use chrono::Utc;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Invalid JSON format. Please check your data.")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Please select or create an index")]
    MissingIndex,
    #[error("{0}")]
    InvalidIndexName(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub fn parse_payload(data: &str) -> Result<Value, IngestError> {
    serde_json::from_str(data).map_err(IngestError::InvalidJson)
}

/// Picks the target index; `true` means it has to be created first.
pub fn resolve_target(
    index: Option<&str>,
    new_index: Option<&str>,
) -> Result<(String, bool), IngestError> {
    fn non_blank(name: Option<&str>) -> Option<&str> {
        name.map(str::trim).filter(|n| !n.is_empty())
    }

    if let Some(name) = non_blank(new_index) {
        validate_index_name(name).map_err(IngestError::InvalidIndexName)?;
        return Ok((name.to_string(), true));
    }
    match non_blank(index) {
        Some(name) => Ok((name.to_string(), false)),
        None => Err(IngestError::MissingIndex),
    }
}

fn usable_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// The document's own `id`, then `_id`, else a time-based name.
pub fn document_id(document: &Value, position: Option<usize>, now_millis: i64) -> String {
    usable_id(document.get("id"))
        .or_else(|| usable_id(document.get("_id")))
        .unwrap_or_else(|| match position {
            Some(i) => format!("doc_{}_{}", now_millis, i),
            None => format!("doc_{}", now_millis),
        })
}

pub fn empty_mapping() -> Value {
    json!({ "mappings": { "properties": {} } })
}

/// Loads a JSON document or array into an index, one call per document.
/// Per-document failures are collected, not fatal.
pub async fn ingest<E>(engine: &E, request: &IngestRequest) -> Result<IngestionResult, IngestError>
where
    E: SearchEngine + Send + Sync + ?Sized,
{
    let data = parse_payload(&request.data)?;
    let (target, create) = resolve_target(request.index.as_deref(), request.new_index.as_deref())?;

    if create {
        info!("Creating index {} with dynamic mapping", target);
        engine.create_index(&target, &empty_mapping()).await?;
    }

    match data {
        Value::Array(documents) => {
            let total = documents.len();
            let mut success_count = 0;
            let mut errors = Vec::new();

            for (i, document) in documents.iter().enumerate() {
                let id = document_id(document, Some(i), Utc::now().timestamp_millis());
                match engine.index_document(&target, &id, document).await {
                    Ok(_) => success_count += 1,
                    Err(e) => {
                        warn!("Failed to ingest document {} into {}: {}", i, target, e);
                        errors.push(format!("Document {}: {}", i, e));
                    }
                }
            }

            info!(
                "Ingestion into {} complete: {} of {} documents",
                target, success_count, total
            );

            Ok(IngestionResult {
                success: success_count > 0,
                message: format!("Processed {} out of {} documents", success_count, total),
                documents_processed: Some(success_count),
                errors: if errors.is_empty() { None } else { Some(errors) },
                index: Some(target),
            })
        }
        document => {
            let id = document_id(&document, None, Utc::now().timestamp_millis());
            engine.index_document(&target, &id, &document).await?;
            info!("Ingested document {} into {}", id, target);

            Ok(IngestionResult {
                success: true,
                message: "Document successfully ingested".to_string(),
                documents_processed: Some(1),
                errors: None,
                index: Some(target),
            })
        }
    }
}

pub fn sample_data() -> Value {
    json!([
        {
            "id": "1",
            "title": "Sample Document 1",
            "content": "This is the content of the first document",
            "category": "example",
            "created_at": "2024-01-01T00:00:00Z",
            "tags": ["sample", "test"]
        },
        {
            "id": "2",
            "title": "Sample Document 2",
            "content": "This is the content of the second document",
            "category": "example",
            "created_at": "2024-01-02T00:00:00Z",
            "tags": ["sample", "demo"]
        }
    ])
}
