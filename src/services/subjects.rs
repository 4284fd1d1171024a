use crate::services::elasticsearch::SearchEngine;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Fields tried, in order, as `<field>.keyword` terms aggregations.
pub const AGGREGATION_FIELDS: [&str; 6] =
    ["subject", "Subject", "category", "Category", "type", "Type"];

/// Fields read from sampled documents when no aggregation produced buckets.
pub const SAMPLE_FIELDS: [&str; 8] = [
    "subject", "Subject", "category", "Category", "type", "Type", "class", "Class",
];

pub const SAMPLE_SIZE: usize = 100;
pub const BUCKET_SIZE: usize = 100;

const MAPPING_HINTS: [&str; 4] = ["subject", "category", "type", "class"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectSource {
    Aggregation,
    Sample,
    None,
}

#[derive(Debug, Clone, Serialize)]
pub struct Subjects {
    pub subjects: Vec<String>,
    pub source: SubjectSource,
}

fn aggregation_query(field: &str) -> Value {
    json!({
        "size": 0,
        "aggs": {
            "subjects": {
                "terms": {
                    "field": format!("{}.keyword", field),
                    "size": BUCKET_SIZE,
                }
            }
        }
    })
}

/// Best-effort discovery of the subject values present in an index.
/// Never fails: nothing found is reported as an empty list.
pub async fn discover_subjects<E>(engine: &E, index: &str) -> Subjects
where
    E: SearchEngine + Send + Sync + ?Sized,
{
    for field in AGGREGATION_FIELDS {
        match engine.search(index, &aggregation_query(field)).await {
            Ok(response) => {
                let keys = response.bucket_keys("subjects");
                if !keys.is_empty() {
                    info!(
                        "Found {} subjects in {} via {}.keyword",
                        keys.len(),
                        index,
                        field
                    );
                    return Subjects {
                        subjects: keys,
                        source: SubjectSource::Aggregation,
                    };
                }
                debug!("No buckets for {}.keyword in {}", field, index);
            }
            Err(e) => {
                warn!("Aggregation on {}.keyword failed in {}: {}", field, index, e);
            }
        }
    }

    let sample = json!({
        "size": SAMPLE_SIZE,
        "query": { "match_all": {} }
    });

    match engine.search(index, &sample).await {
        Ok(response) => {
            let subjects = collect_subjects(response.hits.hits.iter().map(|hit| &hit.source));
            if subjects.is_empty() {
                info!("No subjects found in {}", index);
                Subjects {
                    subjects,
                    source: SubjectSource::None,
                }
            } else {
                Subjects {
                    subjects,
                    source: SubjectSource::Sample,
                }
            }
        }
        Err(e) => {
            warn!("Error sampling documents for subjects in {}: {}", index, e);
            Subjects {
                subjects: Vec::new(),
                source: SubjectSource::None,
            }
        }
    }
}

/// Distinct, trimmed, sorted string values of the sample fields.
pub fn collect_subjects<'a>(sources: impl Iterator<Item = &'a Value>) -> Vec<String> {
    let mut found = BTreeSet::new();

    for source in sources {
        for field in SAMPLE_FIELDS {
            if let Some(value) = source.get(field).and_then(Value::as_str) {
                let value = value.trim();
                if !value.is_empty() {
                    found.insert(value.to_string());
                }
            }
        }
    }

    found.into_iter().collect()
}

/// First subject-ish value of a document, for labelling a hit.
pub fn document_subject(source: &Value) -> Option<String> {
    SAMPLE_FIELDS
        .iter()
        .filter_map(|field| source.get(*field))
        .find(|value| is_truthy(value))
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        _ => true,
    }
}

/// Property names of an index mapping.
pub fn mapping_fields(mapping: &Value, index: &str) -> Vec<String> {
    mapping
        .get(index)
        .and_then(|m| m.get("mappings"))
        .and_then(|m| m.get("properties"))
        .and_then(Value::as_object)
        .map(|props| props.keys().cloned().collect())
        .unwrap_or_default()
}

/// Mapping properties whose names look like a subject field.
pub fn subject_fields_from_mapping(mapping: &Value, index: &str) -> Vec<String> {
    mapping_fields(mapping, index)
        .into_iter()
        .filter(|field| {
            let lower = field.to_lowercase();
            MAPPING_HINTS.iter().any(|hint| lower.contains(hint))
        })
        .collect()
}
