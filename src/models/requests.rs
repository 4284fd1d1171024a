use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateIndexRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub index: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub size: Option<usize>,
}

/// `data` is the raw text of an uploaded file or a paste; it is parsed server-side.
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub new_index: Option<String>,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct CredentialRequest {
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmParams {
    #[serde(default)]
    pub confirm: bool,
}
