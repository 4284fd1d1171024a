use crate::models::credential::CredentialError;
use crate::models::responses::ErrorResponse;
use crate::services::elasticsearch::TransportError;
use crate::services::ingestion::IngestError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

/// Everything a route can fail with. Rendered as `{"error": ..., "status": ...}`.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Ingest(IngestError),
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    ConfirmationRequired(String),
}

impl From<IngestError> for ConsoleError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Transport(transport) => ConsoleError::Transport(transport),
            other => ConsoleError::Ingest(other),
        }
    }
}

impl ConsoleError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConsoleError::Transport(TransportError::Status { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ConsoleError::Transport(_) => StatusCode::BAD_GATEWAY,
            ConsoleError::Credential(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ConsoleError::Ingest(_) | ConsoleError::Invalid(_) => StatusCode::BAD_REQUEST,
            ConsoleError::ConfirmationRequired(_) => StatusCode::PRECONDITION_REQUIRED,
        }
    }

    fn engine_status(&self) -> Option<u16> {
        match self {
            ConsoleError::Transport(transport) => transport.status(),
            _ => None,
        }
    }
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        } else if !matches!(self, ConsoleError::ConfirmationRequired(_)) {
            error!("Request failed ({}): {}", status, self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            status: self.engine_status(),
        };
        (status, Json(body)).into_response()
    }
}
