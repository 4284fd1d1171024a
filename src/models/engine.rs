use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of `_cat/indices?format=json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexSummary {
    pub index: String,
    #[serde(default)]
    pub health: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub pri: Option<String>,
    #[serde(default)]
    pub rep: Option<String>,
    #[serde(rename = "docs.count", default)]
    pub docs_count: Option<String>,
    #[serde(rename = "store.size", default)]
    pub store_size: Option<String>,
}

impl IndexSummary {
    pub fn doc_count(&self) -> u64 {
        self.docs_count
            .as_deref()
            .and_then(|count| count.parse().ok())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitsTotal {
    pub value: u64,
    #[serde(default)]
    pub relation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: Option<HitsTotal>,
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// The subset of a `_search` response the console reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub hits: Hits,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Value>,
}

impl RawSearchResponse {
    pub fn total(&self) -> u64 {
        self.hits.total.as_ref().map(|t| t.value).unwrap_or(0)
    }

    /// Bucket keys of a named terms aggregation, stringified.
    pub fn bucket_keys(&self, name: &str) -> Vec<String> {
        self.aggregations
            .as_ref()
            .and_then(|aggs| aggs.get(name))
            .and_then(|agg| agg.get("buckets"))
            .and_then(Value::as_array)
            .map(|buckets| {
                buckets
                    .iter()
                    .filter_map(|bucket| bucket.get("key"))
                    .map(|key| match key {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
