use crate::model::ValidationError;
use std::time::Duration;

/// Errors surfaced by a [`super::ConfigStore`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("invalid document: {0}")]
    Invalid(#[from] ValidationError),

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
