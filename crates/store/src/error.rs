use std::io;

use thiserror::Error;

/// Failures surfaced by a [`MatchStore`](crate::MatchStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("match record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Ids become file names, so only `[A-Za-z0-9_-]` is accepted.
    #[error("invalid match id {0:?}")]
    InvalidId(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Reject ids that are empty or could escape the data directory.
pub fn validate_id(id: &str) -> Result<()> {
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidId(id.to_string()))
    }
}
