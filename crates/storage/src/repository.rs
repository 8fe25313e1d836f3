use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use quiz_core::model::{ResultRecord, UserId};

/// Errors surfaced by persistence adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),
}

/// Storage identifier for a persisted attempt result.
pub type ResultRowId = i64;

/// A persisted result together with its storage id.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub id: ResultRowId,
    pub record: ResultRecord,
}

/// Sink and query surface for finished attempt records.
///
/// The engine only ever appends; listing exists for the history and
/// last-result views. Durable backends live outside this workspace, this
/// trait is the seam they plug into.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Persist one finished attempt, returning its storage id.
    async fn append_result(&self, record: &ResultRecord) -> Result<ResultRowId, StorageError>;

    /// Fetch a single persisted result by id.
    async fn get_result(&self, id: ResultRowId) -> Result<ResultRow, StorageError>;

    /// Recent results for a user, most recently started first.
    async fn list_recent(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<ResultRow>, StorageError>;

    /// The user's most recently started result, if any.
    async fn latest_for(&self, user: &UserId) -> Result<Option<ResultRow>, StorageError>;
}

/// In-memory adapter used by tests and local runs.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    rows: Arc<Mutex<Vec<ResultRow>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<ResultRow>>, StorageError> {
        self.rows
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    fn rows_for(&self, user: &UserId) -> Result<Vec<ResultRow>, StorageError> {
        let guard = self.lock()?;
        let mut rows: Vec<ResultRow> = guard
            .iter()
            .filter(|row| row.record.user_id() == Some(user))
            .cloned()
            .collect();
        rows.sort_by_key(|row| std::cmp::Reverse(row.record.started_at()));
        Ok(rows)
    }
}

#[async_trait]
impl ResultRepository for InMemoryRepository {
    async fn append_result(&self, record: &ResultRecord) -> Result<ResultRowId, StorageError> {
        let mut guard = self.lock()?;
        let id = ResultRowId::try_from(guard.len())
            .map_err(|e| StorageError::Connection(e.to_string()))?
            + 1;
        guard.push(ResultRow {
            id,
            record: record.clone(),
        });
        Ok(id)
    }

    async fn get_result(&self, id: ResultRowId) -> Result<ResultRow, StorageError> {
        let guard = self.lock()?;
        guard
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_recent(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<ResultRow>, StorageError> {
        let mut rows = self.rows_for(user)?;
        rows.truncate(limit);
        Ok(rows)
    }

    async fn latest_for(&self, user: &UserId) -> Result<Option<ResultRow>, StorageError> {
        Ok(self.rows_for(user)?.into_iter().next())
    }
}
