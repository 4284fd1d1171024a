pub mod credential;
pub mod documents;
pub mod health;
pub mod indices;
pub mod ingest;
pub mod search;
pub mod ui;

use crate::error::ConsoleError;
use crate::models::requests::ConfirmParams;

/// Destructive routes run only when the caller has already confirmed.
pub(crate) fn require_confirmation(
    params: &ConfirmParams,
    prompt: String,
) -> Result<(), ConsoleError> {
    if params.confirm {
        Ok(())
    } else {
        Err(ConsoleError::ConfirmationRequired(prompt))
    }
}
