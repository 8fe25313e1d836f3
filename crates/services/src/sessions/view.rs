use chrono::{DateTime, Utc};
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{SubmitReason, UserId};
use storage::repository::{InMemoryRepository, ResultRepository, ResultRow, ResultRowId};

use crate::error::SessionError;

/// Presentation-agnostic list item for a finished attempt.
///
/// Intentionally **not** a UI view-model: no pre-formatted strings, no
/// localization assumptions. The UI formats timestamps and percentages as it
/// sees fit.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultListItem {
    pub id: ResultRowId,
    pub finished_at: DateTime<Utc>,
    pub score: i64,
    pub total_questions: u32,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub skipped_count: u32,
    pub topics: Vec<String>,
    pub reason: SubmitReason,
}

impl ResultListItem {
    #[must_use]
    pub fn from_row(row: &ResultRow) -> Self {
        let record = &row.record;
        let tally = record.tally();
        Self {
            id: row.id,
            finished_at: record.finished_at(),
            score: tally.score,
            total_questions: record.total_questions(),
            correct_count: tally.correct_count,
            wrong_count: tally.wrong_count,
            skipped_count: tally.skipped_count,
            topics: record.topics().to_vec(),
            reason: record.reason(),
        }
    }
}

/// History facade for the home and history screens: recent attempts and the
/// latest one for a user, hiding the repository behind a narrow surface.
#[derive(Clone)]
pub struct AttemptHistoryService {
    clock: Clock,
    results: Arc<dyn ResultRepository>,
}

impl AttemptHistoryService {
    #[must_use]
    pub fn new(clock: Clock, results: Arc<dyn ResultRepository>) -> Self {
        Self { clock, results }
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(clock, Arc::new(InMemoryRepository::new()))
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Load the user's recent attempts, most recently started first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn list_recent(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<ResultListItem>, SessionError> {
        let rows = self.results.list_recent(user, limit).await?;
        Ok(rows.iter().map(ResultListItem::from_row).collect())
    }

    /// Load the user's most recent attempt, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn latest(&self, user: &UserId) -> Result<Option<ResultListItem>, SessionError> {
        let row = self.results.latest_for(user).await?;
        Ok(row.as_ref().map(ResultListItem::from_row))
    }
}
