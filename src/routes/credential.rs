use crate::error::ConsoleError;
use crate::models::requests::CredentialRequest;
use crate::models::responses::CredentialStatus;
use crate::state::AppState;
use axum::{extract::State, response::Json};
use tracing::info;

/// Shows enough of the key to recognise it, never the whole value.
pub fn mask(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len().max(4));
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}****{}", head, tail)
}

fn status_of(api_key: Option<&str>) -> CredentialStatus {
    CredentialStatus {
        configured: api_key.is_some(),
        masked: api_key.map(mask),
    }
}

pub async fn credential_status(
    State(state): State<AppState>,
) -> Result<Json<CredentialStatus>, ConsoleError> {
    let saved = state.credentials.load().await?;
    Ok(Json(status_of(saved.as_deref())))
}

/// A blank key is the same as clearing.
pub async fn save_credential(
    State(state): State<AppState>,
    Json(request): Json<CredentialRequest>,
) -> Result<Json<CredentialStatus>, ConsoleError> {
    let api_key = request.api_key.trim();
    if api_key.is_empty() {
        return clear(&state).await;
    }

    state.credentials.save(api_key).await?;
    state.engine.set_api_key(Some(api_key.to_string()));
    info!("API key configured");

    Ok(Json(status_of(Some(api_key))))
}

pub async fn clear_credential(
    State(state): State<AppState>,
) -> Result<Json<CredentialStatus>, ConsoleError> {
    clear(&state).await
}

async fn clear(state: &AppState) -> Result<Json<CredentialStatus>, ConsoleError> {
    // the engine drops the key even when the store cannot be updated
    state.engine.set_api_key(None);
    state.credentials.clear().await?;
    info!("API key cleared");
    Ok(Json(status_of(None)))
}
