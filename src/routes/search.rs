use crate::error::ConsoleError;
use crate::models::requests::SearchRequest;
use crate::models::responses::{FieldsResponse, SearchResponse, SearchResult, SubjectsResponse};
use crate::services::query::{build_search_query, SearchInput};
use crate::services::subjects::{
    discover_subjects, document_subject, mapping_fields, subject_fields_from_mapping,
};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::info;

pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ConsoleError> {
    let index = request.index.trim();
    if index.is_empty() {
        return Err(ConsoleError::Invalid("Please select an index".to_string()));
    }

    let query = build_search_query(&SearchInput {
        text: &request.query,
        fields: &request.fields,
        subject: request.subject.as_deref(),
        size: request.size,
    });
    info!("Search on {}: {}", index, query);

    let response = state.engine.search(index, &query).await?;
    let total = response.total();

    let hits = response
        .hits
        .hits
        .into_iter()
        .map(|hit| SearchResult {
            subject: document_subject(&hit.source),
            index: hit.index,
            id: hit.id,
            score: hit.score,
            source: hit.source,
        })
        .collect();

    Ok(Json(SearchResponse {
        index: index.to_string(),
        total,
        took: response.took,
        hits,
    }))
}

pub async fn subjects(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Json<SubjectsResponse> {
    let found = discover_subjects(state.engine.as_ref(), &index).await;
    Json(SubjectsResponse {
        index,
        subjects: found.subjects,
        source: found.source,
    })
}

pub async fn fields(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<FieldsResponse>, ConsoleError> {
    let mapping = state.engine.get_mapping(&index).await?;
    let fields = mapping_fields(&mapping, &index);
    Ok(Json(FieldsResponse { index, fields }))
}

pub async fn subject_fields(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<FieldsResponse>, ConsoleError> {
    let mapping = state.engine.get_mapping(&index).await?;
    let fields = subject_fields_from_mapping(&mapping, &index);
    info!("Potential subject fields in {}: {:?}", index, fields);
    Ok(Json(FieldsResponse { index, fields }))
}

#[cfg(test)]
mod tests {
    use crate::testing::{send, test_app, FakeEngine};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn search_shapes_results_and_labels_subjects() {
        let engine = Arc::new(FakeEngine::with_indices(&["courses"]));
        engine.push_search_ok(json!({
            "took": 7,
            "hits": {"total": {"value": 12, "relation": "eq"}, "hits": [
                {"_index": "courses", "_id": "1", "_score": 2.5,
                 "_source": {"title": "Algebra", "Category": "Math"}},
                {"_index": "courses", "_id": "2", "_score": null,
                 "_source": {"title": "Untagged"}}
            ]}
        }));
        let (app, _) = test_app(engine.clone());

        let (status, body) = send(
            app,
            Method::POST,
            "/api/search",
            Some(json!({"index": "courses", "query": "algebra", "subject": "Math"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 12);
        assert_eq!(body["took"], 7);
        assert_eq!(body["hits"][0]["subject"], "Math");
        assert_eq!(body["hits"][0]["score"], 2.5);
        assert!(body["hits"][1].get("subject").is_none());

        let sent = &engine.search_bodies()[0];
        assert_eq!(sent["query"]["bool"]["minimum_should_match"], 1);
        assert_eq!(sent["query"]["bool"]["must"][0]["multi_match"]["query"], "algebra");
    }

    #[tokio::test]
    async fn search_without_index_is_rejected() {
        let engine = Arc::new(FakeEngine::default());
        let (app, _) = test_app(engine.clone());
        let (status, _) = send(app, Method::POST, "/api/search", Some(json!({"index": " "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(engine.calls().is_empty());
    }

    #[tokio::test]
    async fn subjects_never_fail() {
        let engine = Arc::new(FakeEngine::default());
        engine.mark_missing("ghost");
        let (app, _) = test_app(engine.clone());

        let (status, body) = send(app, Method::GET, "/api/indices/ghost/subjects", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "none");
        assert_eq!(body["subjects"], json!([]));
        assert_eq!(engine.calls().len(), 7);
    }

    #[tokio::test]
    async fn fields_come_from_mapping() {
        let (app, _) = test_app(Arc::new(FakeEngine::with_indices(&["books"])));
        let (_, body) = send(app.clone(), Method::GET, "/api/indices/books/fields", None).await;
        assert_eq!(body["fields"], json!(["subject", "title"]));

        let (_, body) =
            send(app, Method::GET, "/api/indices/books/subject-fields", None).await;
        assert_eq!(body["fields"], json!(["subject"]));
    }
}
