//! In-memory `SearchEngine` that records every call, plus router helpers for handler tests.

use crate::models::credential::MemoryCredentialStore;
use crate::models::engine::{IndexSummary, RawSearchResponse};
use crate::services::elasticsearch::{SearchEngine, TransportError};
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

type Scripted = Result<Value, (u16, String)>;

#[derive(Default)]
pub struct FakeEngine {
    calls: Mutex<Vec<String>>,
    search_bodies: Mutex<Vec<Value>>,
    created: Mutex<Vec<(String, Value)>>,
    search_script: Mutex<VecDeque<Scripted>>,
    indices: Mutex<Vec<IndexSummary>>,
    documents: Mutex<BTreeMap<String, Vec<(String, Value)>>>,
    failing_ids: Mutex<HashSet<String>>,
    missing_indices: Mutex<HashSet<String>>,
    api_key: Mutex<Option<String>>,
}

impl FakeEngine {
    pub fn with_indices(names: &[&str]) -> Self {
        let engine = Self::default();
        for name in names {
            engine.indices.lock().unwrap().push(summary(name));
        }
        engine
    }

    pub fn push_search_ok(&self, response: Value) {
        self.search_script.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_search_err(&self, status: u16, body: &str) {
        self.search_script
            .lock()
            .unwrap()
            .push_back(Err((status, body.to_string())));
    }

    pub fn fail_document(&self, id: &str) {
        self.failing_ids.lock().unwrap().insert(id.to_string());
    }

    pub fn mark_missing(&self, index: &str) {
        self.missing_indices.lock().unwrap().insert(index.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_bodies(&self) -> Vec<Value> {
        self.search_bodies.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<(String, Value)> {
        self.created.lock().unwrap().clone()
    }

    pub fn stored(&self, index: &str) -> Vec<(String, Value)> {
        self.documents
            .lock()
            .unwrap()
            .get(index)
            .cloned()
            .unwrap_or_default()
    }

    pub fn api_key(&self) -> Option<String> {
        self.api_key.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_exists(&self, index: &str) -> Result<(), TransportError> {
        if self.missing_indices.lock().unwrap().contains(index) {
            return Err(TransportError::Status {
                status: 404,
                body: "index_not_found_exception".to_string(),
            });
        }
        Ok(())
    }
}

fn summary(name: &str) -> IndexSummary {
    IndexSummary {
        index: name.to_string(),
        health: Some("green".to_string()),
        status: Some("open".to_string()),
        pri: Some("1".to_string()),
        rep: Some("0".to_string()),
        docs_count: Some("0".to_string()),
        store_size: Some("225b".to_string()),
    }
}

#[async_trait]
impl SearchEngine for FakeEngine {
    fn set_api_key(&self, api_key: Option<String>) {
        *self.api_key.lock().unwrap() = api_key;
    }

    fn has_api_key(&self) -> bool {
        self.api_key.lock().unwrap().is_some()
    }

    async fn check_health(&self) -> Result<Value, TransportError> {
        self.record("GET /_cluster/health".to_string());
        Ok(json!({"cluster_name": "fake", "status": "green"}))
    }

    async fn get_indices(&self) -> Result<Vec<IndexSummary>, TransportError> {
        self.record("GET /_cat/indices".to_string());
        Ok(self.indices.lock().unwrap().clone())
    }

    async fn search(&self, index: &str, body: &Value) -> Result<RawSearchResponse, TransportError> {
        self.record(format!("POST /{}/_search", index));
        self.search_bodies.lock().unwrap().push(body.clone());
        self.check_exists(index)?;

        let scripted = self.search_script.lock().unwrap().pop_front();
        let value = match scripted {
            Some(Ok(value)) => value,
            Some(Err((status, body))) => return Err(TransportError::Status { status, body }),
            None => {
                let hits: Vec<Value> = self
                    .stored(index)
                    .into_iter()
                    .map(|(id, source)| {
                        json!({"_index": index, "_id": id, "_score": 1.0, "_source": source})
                    })
                    .collect();
                json!({"took": 1, "hits": {"total": {"value": hits.len()}, "hits": hits}})
            }
        };
        Ok(serde_json::from_value(value)?)
    }

    async fn get_mapping(&self, index: &str) -> Result<Value, TransportError> {
        self.record(format!("GET /{}/_mapping", index));
        self.check_exists(index)?;
        Ok(json!({ index: {"mappings": {"properties": {
            "title": {"type": "text"},
            "subject": {"type": "keyword"}
        }}}}))
    }

    async fn get_document(&self, index: &str, id: &str) -> Result<Value, TransportError> {
        self.record(format!("GET /{}/_doc/{}", index, id));
        self.check_exists(index)?;
        self.stored(index)
            .into_iter()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(doc_id, source)| {
                json!({"_index": index, "_id": doc_id, "found": true, "_source": source})
            })
            .ok_or_else(|| TransportError::Status {
                status: 404,
                body: json!({"_index": index, "_id": id, "found": false}).to_string(),
            })
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<Value, TransportError> {
        self.record(format!("PUT /{}", index));
        self.created
            .lock()
            .unwrap()
            .push((index.to_string(), body.clone()));
        let mut indices = self.indices.lock().unwrap();
        if indices.iter().any(|i| i.index == index) {
            return Err(TransportError::Status {
                status: 400,
                body: "resource_already_exists_exception".to_string(),
            });
        }
        indices.push(summary(index));
        Ok(json!({"acknowledged": true, "index": index}))
    }

    async fn delete_index(&self, index: &str) -> Result<Value, TransportError> {
        self.record(format!("DELETE /{}", index));
        self.check_exists(index)?;
        self.indices.lock().unwrap().retain(|i| i.index != index);
        self.documents.lock().unwrap().remove(index);
        Ok(json!({"acknowledged": true}))
    }

    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<Value, TransportError> {
        self.record(format!("PUT /{}/_doc/{}", index, id));
        self.check_exists(index)?;
        if self.failing_ids.lock().unwrap().contains(id) {
            return Err(TransportError::Status {
                status: 400,
                body: "mapper_parsing_exception".to_string(),
            });
        }
        let mut documents = self.documents.lock().unwrap();
        let docs = documents.entry(index.to_string()).or_default();
        docs.retain(|(doc_id, _)| doc_id != id);
        docs.push((id.to_string(), document.clone()));
        Ok(json!({"_index": index, "_id": id, "result": "created"}))
    }

    async fn delete_document(&self, index: &str, id: &str) -> Result<Value, TransportError> {
        self.record(format!("DELETE /{}/_doc/{}", index, id));
        self.check_exists(index)?;
        if let Some(docs) = self.documents.lock().unwrap().get_mut(index) {
            docs.retain(|(doc_id, _)| doc_id != id);
        }
        Ok(json!({"_index": index, "_id": id, "result": "deleted"}))
    }
}

pub fn test_app(engine: Arc<FakeEngine>) -> (Router, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::default());
    let state = AppState::new(engine, store.clone());
    (crate::app(state), store)
}

async fn dispatch(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    dispatch(app, request).await
}

pub async fn send_text(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    dispatch(app, request).await
}
