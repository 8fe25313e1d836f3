use rand::Rng;
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::config::QuizConfig;
use quiz_core::model::{QuestionPool, ResultRecord, SubmitReason};
use storage::repository::ResultRepository;

use super::plan::AttemptSelector;
use super::service::SessionController;
use crate::error::SessionError;
use crate::identity::IdentityProvider;

/// Orchestrates attempt start, ticking and best-effort persistence.
///
/// The pool is shared and read-only; identity and the result sink are
/// injected capabilities, so the engine keeps no process-wide mutable state
/// of its own.
#[derive(Clone)]
pub struct QuizFlow {
    clock: Clock,
    config: QuizConfig,
    pool: Arc<QuestionPool>,
    identity: Arc<dyn IdentityProvider>,
    results: Arc<dyn ResultRepository>,
}

impl QuizFlow {
    #[must_use]
    pub fn new(
        clock: Clock,
        config: QuizConfig,
        pool: Arc<QuestionPool>,
        identity: Arc<dyn IdentityProvider>,
        results: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            clock,
            config,
            pool,
            identity,
            results,
        }
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Start a new attempt over the selected topics with thread randomness.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoTopics` for an empty topic list and
    /// `SessionError::Empty` when the selection yields no questions.
    pub fn start_attempt(&self, topics: &[String]) -> Result<SessionController, SessionError> {
        self.start_attempt_with_rng(topics, &mut rand::rng())
    }

    /// Start a new attempt with caller-provided randomness, so tests can
    /// pin the shuffle.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoTopics` for an empty topic list and
    /// `SessionError::Empty` when the selection yields no questions.
    pub fn start_attempt_with_rng<R: Rng + ?Sized>(
        &self,
        topics: &[String],
        rng: &mut R,
    ) -> Result<SessionController, SessionError> {
        if topics.is_empty() {
            return Err(SessionError::NoTopics);
        }

        let plan = AttemptSelector::new(self.pool.as_ref(), self.config.questions_per_attempt)
            .select(topics, rng);

        let mut session = SessionController::new(
            plan,
            topics.to_vec(),
            self.identity.current_identity(),
            self.config.clone(),
        )?;
        session.start(self.clock.now());
        Ok(session)
    }

    /// Submit the attempt manually and hand the record to the sink.
    ///
    /// Persistence is a single best-effort attempt: a failure is logged and
    /// swallowed, the returned record and the `Completed` transition are
    /// unaffected. A re-entrant call returns the existing record without
    /// persisting again.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` for an attempt that never started.
    pub async fn submit_attempt(
        &self,
        session: &mut SessionController,
    ) -> Result<ResultRecord, SessionError> {
        let already_complete = session.is_complete();
        let record = session.submit(SubmitReason::Manual, self.clock.now())?.clone();
        if !already_complete {
            self.persist_best_effort(&record).await;
        }
        Ok(record)
    }

    /// Drive one second of the global countdown, persisting the result when
    /// the tick triggers the timeout auto-submit.
    ///
    /// # Errors
    ///
    /// Propagates record-construction failures from the timeout submit.
    pub async fn tick(
        &self,
        session: &mut SessionController,
    ) -> Result<Option<ResultRecord>, SessionError> {
        let fired = session.tick(self.clock.now())?.cloned();
        if let Some(record) = &fired {
            self.persist_best_effort(record).await;
        }
        Ok(fired)
    }

    /// One attempt, no retries; absence of an identity means there is
    /// nothing to attribute the record to, so the save is skipped.
    async fn persist_best_effort(&self, record: &ResultRecord) {
        if record.user_id().is_none() {
            tracing::debug!("no identity, skipping result persistence");
            return;
        }

        if let Err(error) = self.results.append_result(record).await {
            tracing::warn!(%error, "failed to persist attempt result");
        }
    }
}
