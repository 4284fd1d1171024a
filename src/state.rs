use crate::models::credential::CredentialStore;
use crate::services::elasticsearch::SearchEngine;
use std::sync::Arc;
use tracing::{info, warn};

pub type Engine = Arc<dyn SearchEngine + Send + Sync>;
pub type Credentials = Arc<dyn CredentialStore + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub credentials: Credentials,
}

impl AppState {
    pub fn new(engine: Engine, credentials: Credentials) -> Self {
        Self {
            engine,
            credentials,
        }
    }

    /// Installs the saved API key, if any, on the transport client.
    pub async fn restore_credential(&self) {
        match self.credentials.load().await {
            Ok(Some(api_key)) => {
                info!("Loaded saved API key");
                self.engine.set_api_key(Some(api_key));
            }
            Ok(None) => info!("No saved API key"),
            Err(e) => warn!("Failed to load saved API key: {}", e),
        }
    }
}
