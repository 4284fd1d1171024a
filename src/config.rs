use std::path::PathBuf;

pub const DEFAULT_PORT: &str = "7000";
pub const DEFAULT_ELASTICSEARCH_URL: &str = "http://localhost:9200";
pub const DEFAULT_CREDENTIAL_PATH: &str = ".elastic-console/credentials.json";
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialBackend {
    File(PathBuf),
    Redis(String),
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: String,
    pub elasticsearch_url: String,
    pub credential_backend: CredentialBackend,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let credential_backend = match var("CREDENTIAL_BACKEND", "file").to_lowercase().as_str() {
            "redis" => CredentialBackend::Redis(var("REDIS_URL", DEFAULT_REDIS_URL)),
            "memory" => CredentialBackend::Memory,
            _ => CredentialBackend::File(PathBuf::from(var(
                "CREDENTIAL_PATH",
                DEFAULT_CREDENTIAL_PATH,
            ))),
        };

        Self {
            port: var("PORT", DEFAULT_PORT),
            elasticsearch_url: var("ELASTICSEARCH_URL", DEFAULT_ELASTICSEARCH_URL)
                .trim_end_matches('/')
                .to_string(),
            credential_backend,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
