//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::ResultRecordError;
use storage::repository::StorageError;

/// Errors emitted while loading question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PoolError {
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

/// Errors emitted by the session engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no topics selected")]
    NoTopics,
    #[error("no questions available for attempt")]
    Empty,
    #[error("attempt has not started")]
    NotStarted,
    #[error("attempt already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Record(#[from] ResultRecordError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
