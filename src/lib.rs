//! Browser console for an Elasticsearch cluster: a JSON API over the engine's REST
//! surface plus the page that drives it.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

use routes::{
    credential::{clear_credential, credential_status, save_credential},
    documents::{delete_document, get_document, list_documents, put_document},
    health::{cluster_health, health_check},
    indices::{create_index, delete_index, get_mapping, list_index_names, list_indices},
    ingest::{ingest_data, sample},
    search::{fields, search, subject_fields, subjects},
    ui::index_page,
};
use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/status", get(health_check))
        .route("/api/health", get(cluster_health))
        .route("/api/indices", get(list_indices).post(create_index))
        .route("/api/indices/names", get(list_index_names))
        .route("/api/indices/:index", delete(delete_index))
        .route("/api/indices/:index/mapping", get(get_mapping))
        .route("/api/indices/:index/fields", get(fields))
        .route("/api/indices/:index/subjects", get(subjects))
        .route("/api/indices/:index/subject-fields", get(subject_fields))
        .route("/api/indices/:index/documents", get(list_documents))
        .route(
            "/api/indices/:index/documents/:id",
            get(get_document).put(put_document).delete(delete_document),
        )
        .route("/api/search", post(search))
        .route("/api/ingest", post(ingest_data))
        .route("/api/ingest/sample", get(sample))
        .route(
            "/api/credential",
            get(credential_status)
                .put(save_credential)
                .delete(clear_credential),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use crate::testing::{test_app, FakeEngine};
    use axum::{body::Body, http::Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn page_is_served_at_root() {
        let (app, _) = test_app(Arc::new(FakeEngine::default()));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_success());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Elasticsearch Console"));
    }
}
