use async_trait::async_trait;
use redis::AsyncCommands;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

/// Key under which the API key is kept, in every backend.
pub const API_KEY_ENTRY: &str = "elasticsearch_api_key";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistent home of the single API key string.
#[async_trait]
pub trait CredentialStore {
    async fn load(&self) -> Result<Option<String>, CredentialError>;
    async fn save(&self, api_key: &str) -> Result<(), CredentialError>;
    async fn clear(&self) -> Result<(), CredentialError>;
}

/// A small JSON key-value file, the server-side stand-in for browser local storage.
pub struct FileCredentialStore {
    path: PathBuf,
    // serializes read-modify-write of the file
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>, CredentialError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<String>, CredentialError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_entries().await?.remove(API_KEY_ENTRY))
    }

    async fn save(&self, api_key: &str) -> Result<(), CredentialError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(API_KEY_ENTRY.to_string(), api_key.to_string());
        self.write_entries(&entries).await?;
        info!("API key saved to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(API_KEY_ENTRY).is_some() {
            self.write_entries(&entries).await?;
            info!("API key removed from {}", self.path.display());
        }
        Ok(())
    }
}

pub struct RedisCredentialStore {
    client: redis::Client,
}

impl RedisCredentialStore {
    pub fn new(redis_url: &str) -> Result<Self, CredentialError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, CredentialError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl CredentialStore for RedisCredentialStore {
    async fn load(&self) -> Result<Option<String>, CredentialError> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.get(API_KEY_ENTRY).await?;
        Ok(value)
    }

    async fn save(&self, api_key: &str) -> Result<(), CredentialError> {
        let mut conn = self.get_connection().await?;
        conn.set::<_, _, ()>(API_KEY_ENTRY, api_key).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        let mut conn = self.get_connection().await?;
        conn.del::<_, ()>(API_KEY_ENTRY).await?;
        Ok(())
    }
}

/// Process-lifetime store; nothing survives a restart.
#[derive(Default)]
pub struct MemoryCredentialStore {
    value: Mutex<Option<String>>,
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.value.lock().await.clone())
    }

    async fn save(&self, api_key: &str) -> Result<(), CredentialError> {
        *self.value.lock().await = Some(api_key.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        *self.value.lock().await = None;
        Ok(())
    }
}
