use serde_json::{json, Map, Value};

pub const DEFAULT_RESULT_SIZE: usize = 50;

/// Spellings tried when filtering hits by subject.
pub const SUBJECT_MATCH_FIELDS: [&str; 6] =
    ["subject", "Subject", "category", "Category", "type", "Type"];

/// Searched when a subject narrows the results and no allow-list was given.
pub const CONTENT_FIELDS: [&str; 5] = ["title^2", "content", "description", "text", "body"];

/// Free-text search without a subject also looks into the subject-ish fields.
pub const TEXT_ONLY_FIELDS: [&str; 8] = [
    "title^2",
    "content",
    "description",
    "text",
    "body",
    "subject",
    "Subject",
    "category",
];

/// Inputs from the search view.
#[derive(Debug, Clone, Default)]
pub struct SearchInput<'a> {
    pub text: &'a str,
    pub fields: &'a [String],
    pub subject: Option<&'a str>,
    pub size: Option<usize>,
}

pub fn build_search_query(input: &SearchInput<'_>) -> Value {
    let text = input.text.trim();
    let subject = input.subject.map(str::trim).filter(|s| !s.is_empty());

    let query = match (subject, text.is_empty()) {
        (Some(subject), false) => {
            let mut group = subject_group(subject);
            group.insert(
                "must".to_string(),
                json!([multi_match(input.text, input.fields, &CONTENT_FIELDS)]),
            );
            json!({ "bool": group })
        }
        (Some(subject), true) => json!({ "bool": subject_group(subject) }),
        (None, false) => multi_match(input.text, input.fields, &TEXT_ONLY_FIELDS),
        (None, true) => json!({ "match_all": {} }),
    };

    json!({
        "size": input.size.unwrap_or(DEFAULT_RESULT_SIZE),
        "query": query,
    })
}

fn subject_group(subject: &str) -> Map<String, Value> {
    let should: Vec<Value> = SUBJECT_MATCH_FIELDS
        .iter()
        .map(|field| json!({ "match": { *field: subject } }))
        .collect();

    let mut group = Map::new();
    group.insert("should".to_string(), Value::Array(should));
    group.insert("minimum_should_match".to_string(), json!(1));
    group
}

fn multi_match(text: &str, allow_list: &[String], fallback: &[&str]) -> Value {
    let fields: Vec<&str> = if allow_list.is_empty() {
        fallback.to_vec()
    } else {
        allow_list.iter().map(String::as_str).collect()
    };

    json!({
        "multi_match": {
            "query": text,
            "fields": fields,
        }
    })
}

/// Match-all listing used by the document browser.
pub fn match_all_query(size: usize) -> Value {
    json!({
        "query": { "match_all": {} },
        "size": size,
    })
}
