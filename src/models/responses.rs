use crate::models::engine::IndexSummary;
use crate::services::subjects::SubjectSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize, Serialize, Debug)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectionResponse {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub api_key_configured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexListResponse {
    pub count: usize,
    pub indices: Vec<IndexSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexNamesResponse {
    pub indices: Vec<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldsResponse {
    pub index: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub index: String,
    pub id: String,
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub source: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub index: String,
    pub total: u64,
    pub took: u64,
    pub hits: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct SubjectsResponse {
    pub index: String,
    pub subjects: Vec<String>,
    pub source: SubjectSource,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub index: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    pub preview: String,
    pub source: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub index: String,
    pub count: usize,
    pub documents: Vec<DocumentSummary>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IngestionResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents_processed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialStatus {
    pub configured: bool,
    pub masked: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}
