use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{AnswerOption, OptionId, QuestionId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResultRecordError {
    #[error("finished_at is before started_at")]
    InvalidTimeRange,

    #[error("too many verdicts for a single attempt: {len}")]
    TooManyVerdicts { len: usize },

    #[error("total questions ({total}) does not match tally counts ({sum})")]
    TallyMismatch { total: u32, sum: u32 },
}

/// Why an attempt was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitReason {
    Manual,
    Timeout,
}

impl fmt::Display for SubmitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitReason::Manual => write!(f, "manual"),
            SubmitReason::Timeout => write!(f, "timeout"),
        }
    }
}

/// Per-question classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictKind {
    Correct,
    Wrong,
    Skipped,
}

/// Per-question review data: classification plus everything the review
/// display needs to show what was asked, picked and expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub question_id: QuestionId,
    pub question_text: String,
    pub options: Vec<AnswerOption>,
    pub correct_option_ids: Vec<OptionId>,
    pub selected_option_ids: Vec<OptionId>,
    pub verdict: VerdictKind,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.verdict == VerdictKind::Correct
    }
}

/// Aggregate score for a completed attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTally {
    pub score: i64,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub skipped_count: u32,
}

impl ScoreTally {
    /// Sum of the three classification counts.
    #[must_use]
    pub fn classified_count(&self) -> u32 {
        self.correct_count + self.wrong_count + self.skipped_count
    }
}

/// Canonical payload for a finished attempt, produced once at submission and
/// never mutated afterwards. Serializes to the camelCase document shape the
/// persistence sink stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    attempt_id: Uuid,
    user_id: Option<UserId>,
    topics: Vec<String>,
    #[serde(flatten)]
    tally: ScoreTally,
    total_questions: u32,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    duration_seconds: i64,
    reason: SubmitReason,
    results: Vec<Verdict>,
}

impl ResultRecord {
    /// Assemble a record for a scored attempt, assigning a fresh attempt id.
    ///
    /// # Errors
    ///
    /// Returns `ResultRecordError::InvalidTimeRange` if `finished_at` is
    /// before `started_at`, and `TallyMismatch` if the tally counts do not
    /// partition the question set.
    pub fn new(
        user_id: Option<UserId>,
        topics: Vec<String>,
        tally: ScoreTally,
        verdicts: Vec<Verdict>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        reason: SubmitReason,
    ) -> Result<Self, ResultRecordError> {
        if finished_at < started_at {
            return Err(ResultRecordError::InvalidTimeRange);
        }

        let total = u32::try_from(verdicts.len())
            .map_err(|_| ResultRecordError::TooManyVerdicts {
                len: verdicts.len(),
            })?;
        let sum = tally.classified_count();
        if sum != total {
            return Err(ResultRecordError::TallyMismatch { total, sum });
        }

        let duration_seconds = (finished_at - started_at).num_seconds();

        Ok(Self {
            attempt_id: Uuid::new_v4(),
            user_id,
            topics,
            tally,
            total_questions: total,
            started_at,
            finished_at,
            duration_seconds,
            reason,
            results: verdicts,
        })
    }

    #[must_use]
    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    #[must_use]
    pub fn tally(&self) -> ScoreTally {
        self.tally
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.tally.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    #[must_use]
    pub fn duration_seconds(&self) -> i64 {
        self.duration_seconds
    }

    #[must_use]
    pub fn reason(&self) -> SubmitReason {
        self.reason
    }

    #[must_use]
    pub fn results(&self) -> &[Verdict] {
        &self.results
    }
}
