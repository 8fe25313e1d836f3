use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::config::QuizConfig;
use quiz_core::model::{
    OptionId, Question, QuestionId, ResultRecord, SelectionState, SubmitReason, UserId,
};

use super::plan::AttemptPlan;
use super::progress::AttemptProgress;
use crate::error::SessionError;
use crate::scoring::ScoringEngine;

/// Attempt lifecycle. There is no way back: once an attempt leaves
/// `InProgress` a new attempt needs a fresh controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    InProgress,
    Submitting,
    Completed,
}

/// In-memory state machine for one timed attempt.
///
/// Owns the fixed question set, the learner's selections, the cursor and the
/// global countdown. All operations are synchronous; the host serializes
/// user events and the one-second tick onto the same execution context, so
/// the only race worth guarding is a timeout-fired submit overlapping a
/// manual one, and the phase check resolves that: whichever call leaves
/// `InProgress` first wins, the loser is a no-op.
pub struct SessionController {
    questions: Vec<Question>,
    topics: Vec<String>,
    user: Option<UserId>,
    config: QuizConfig,
    selections: SelectionState,
    current: usize,
    remaining_seconds: u32,
    started_at: Option<DateTime<Utc>>,
    phase: SessionPhase,
    record: Option<ResultRecord>,
}

impl SessionController {
    /// Create a controller for a selected question set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the plan holds no questions; a
    /// zero-length timer must never start.
    pub fn new(
        plan: AttemptPlan,
        topics: Vec<String>,
        user: Option<UserId>,
        config: QuizConfig,
    ) -> Result<Self, SessionError> {
        if plan.is_empty() {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            questions: plan.questions,
            topics,
            user,
            config,
            selections: SelectionState::new(),
            current: 0,
            remaining_seconds: 0,
            started_at: None,
            phase: SessionPhase::Loading,
            record: None,
        })
    }

    /// Begin the attempt: arms the global countdown at
    /// `time_per_question_seconds x N` and stamps the start time.
    ///
    /// Has no effect unless the session is still loading.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.phase != SessionPhase::Loading {
            return;
        }
        self.remaining_seconds = self.config.total_time_for(self.questions.len());
        self.started_at = Some(now);
        self.current = 0;
        self.phase = SessionPhase::InProgress;
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Total number of questions in this attempt.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn selections(&self) -> &SelectionState {
        &self.selections
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    /// The immutable result, present once the attempt completed.
    #[must_use]
    pub fn result(&self) -> Option<&ResultRecord> {
        self.record.as_ref()
    }

    /// Returns a summary of the current attempt progress.
    #[must_use]
    pub fn progress(&self) -> AttemptProgress {
        AttemptProgress {
            current_index: self.current,
            total: self.questions.len(),
            answered: self.selections.answered_count(),
            remaining_seconds: self.remaining_seconds,
            is_complete: self.is_complete(),
        }
    }

    /// Flip membership of an option in a question's selection set.
    ///
    /// Leaves the cursor and the countdown untouched; toggling the same pair
    /// twice restores the original state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start` and
    /// `SessionError::AlreadySubmitted` once the attempt left `InProgress`.
    pub fn toggle_option(
        &mut self,
        question_id: &QuestionId,
        option_id: &OptionId,
    ) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Loading => Err(SessionError::NotStarted),
            SessionPhase::InProgress => {
                self.selections.toggle(question_id, option_id);
                Ok(())
            }
            SessionPhase::Submitting | SessionPhase::Completed => {
                Err(SessionError::AlreadySubmitted)
            }
        }
    }

    /// Move the cursor forward; a no-op at the last question.
    pub fn go_next(&mut self) {
        if self.phase == SessionPhase::InProgress && self.current + 1 < self.questions.len() {
            self.current += 1;
        }
    }

    /// Move the cursor back; a no-op at the first question.
    pub fn go_back(&mut self) {
        if self.phase == SessionPhase::InProgress {
            self.current = self.current.saturating_sub(1);
        }
    }

    /// Skip is a display affordance over `go_next`: it never clears the
    /// current question's selection. "Skipped" is derived at scoring time
    /// from an empty selection, not recorded here.
    pub fn skip(&mut self) {
        self.go_next();
    }

    /// One cooperative one-second tick of the global countdown.
    ///
    /// Decrements the remaining time, floored at zero, and auto-submits with
    /// `SubmitReason::Timeout` the moment it reaches zero. Outside
    /// `InProgress` the tick is ignored, so no tick lands after a submission
    /// began.
    ///
    /// # Errors
    ///
    /// Propagates record-construction failures from the timeout submit.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<Option<&ResultRecord>, SessionError> {
        if self.phase != SessionPhase::InProgress {
            return Ok(None);
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return Ok(None);
        }

        self.submit(SubmitReason::Timeout, now).map(Some)
    }

    /// Submit the attempt: score synchronously and seal the result.
    ///
    /// Only an `InProgress` attempt transitions; a re-entrant call while
    /// `Submitting`/`Completed` is a no-op that returns the already-built
    /// record, which is what resolves the manual-versus-timeout race.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`; propagates
    /// `SessionError::Record` if the result payload cannot be assembled.
    pub fn submit(
        &mut self,
        reason: SubmitReason,
        now: DateTime<Utc>,
    ) -> Result<&ResultRecord, SessionError> {
        match self.phase {
            SessionPhase::Loading => return Err(SessionError::NotStarted),
            SessionPhase::Submitting | SessionPhase::Completed => {
                return self.record.as_ref().ok_or(SessionError::AlreadySubmitted);
            }
            SessionPhase::InProgress => {}
        }

        self.phase = SessionPhase::Submitting;
        let started_at = self.started_at.ok_or(SessionError::NotStarted)?;

        let engine = ScoringEngine::new(self.config.scoring);
        let (tally, verdicts) = engine.score(&self.questions, &self.selections);

        let record = ResultRecord::new(
            self.user.clone(),
            self.topics.clone(),
            tally,
            verdicts,
            started_at,
            now,
            reason,
        )?;

        self.phase = SessionPhase::Completed;
        Ok(&*self.record.insert(record))
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("questions_len", &self.questions.len())
            .field("topics", &self.topics)
            .field("current", &self.current)
            .field("remaining_seconds", &self.remaining_seconds)
            .field("phase", &self.phase)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
