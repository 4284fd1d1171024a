use crate::models::engine::{IndexSummary, RawSearchResponse};
use async_trait::async_trait;
use reqwest::{header, Client, Method, Url};
use serde_json::Value;
use std::sync::RwLock;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error! status: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid engine URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// HTTP status reported by the engine, if the call got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The engine's REST surface as the console uses it. Each method is one HTTP call.
#[async_trait]
pub trait SearchEngine {
    /// Replaces the credential attached to every subsequent call.
    fn set_api_key(&self, api_key: Option<String>);
    fn has_api_key(&self) -> bool;

    async fn check_health(&self) -> Result<Value, TransportError>;
    async fn get_indices(&self) -> Result<Vec<IndexSummary>, TransportError>;
    async fn search(&self, index: &str, body: &Value) -> Result<RawSearchResponse, TransportError>;
    async fn get_mapping(&self, index: &str) -> Result<Value, TransportError>;
    async fn get_document(&self, index: &str, id: &str) -> Result<Value, TransportError>;
    async fn create_index(&self, index: &str, body: &Value) -> Result<Value, TransportError>;
    async fn delete_index(&self, index: &str) -> Result<Value, TransportError>;
    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<Value, TransportError>;
    async fn delete_document(&self, index: &str, id: &str) -> Result<Value, TransportError>;
}

pub struct ElasticsearchClient {
    client: Client,
    base_url: String,
    api_key: RwLock<Option<String>>,
}

impl ElasticsearchClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: RwLock::new(None),
        }
    }

    fn api_key(&self) -> Option<String> {
        match self.api_key.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn endpoint(&self, segments: &[&str], query: Option<&str>) -> Result<Url, TransportError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        url.set_query(query);
        Ok(url)
    }

    async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(api_key) = self.api_key() {
            request = request.header(header::AUTHORIZATION, format!("ApiKey {}", api_key));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl SearchEngine for ElasticsearchClient {
    fn set_api_key(&self, api_key: Option<String>) {
        match self.api_key.write() {
            Ok(mut guard) => *guard = api_key,
            Err(poisoned) => *poisoned.into_inner() = api_key,
        }
    }

    fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    async fn check_health(&self) -> Result<Value, TransportError> {
        let url = self.endpoint(&["_cluster", "health"], None)?;
        self.request(Method::GET, url, None).await
    }

    async fn get_indices(&self) -> Result<Vec<IndexSummary>, TransportError> {
        let url = self.endpoint(&["_cat", "indices"], Some("format=json"))?;
        let value = self.request(Method::GET, url, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn search(&self, index: &str, body: &Value) -> Result<RawSearchResponse, TransportError> {
        let url = self.endpoint(&[index, "_search"], None)?;
        let value = self.request(Method::POST, url, Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_mapping(&self, index: &str) -> Result<Value, TransportError> {
        let url = self.endpoint(&[index, "_mapping"], None)?;
        self.request(Method::GET, url, None).await
    }

    async fn get_document(&self, index: &str, id: &str) -> Result<Value, TransportError> {
        let url = self.endpoint(&[index, "_doc", id], None)?;
        self.request(Method::GET, url, None).await
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.endpoint(&[index], None)?;
        self.request(Method::PUT, url, Some(body)).await
    }

    async fn delete_index(&self, index: &str) -> Result<Value, TransportError> {
        let url = self.endpoint(&[index], None)?;
        self.request(Method::DELETE, url, None).await
    }

    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<Value, TransportError> {
        let url = self.endpoint(&[index, "_doc", id], None)?;
        self.request(Method::PUT, url, Some(document)).await
    }

    async fn delete_document(&self, index: &str, id: &str) -> Result<Value, TransportError> {
        let url = self.endpoint(&[index, "_doc", id], None)?;
        self.request(Method::DELETE, url, None).await
    }
}
