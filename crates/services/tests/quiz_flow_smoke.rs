use std::sync::Arc;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;

use quiz_core::config::QuizConfig;
use quiz_core::model::{
    OptionId, QuestionId, QuestionPool, ResultRecord, SubmitReason, UserId,
};
use quiz_core::time::fixed_now;
use services::{Clock, FixedIdentity, PoolBuilder, QuizFlow, SessionError};
use storage::repository::{
    InMemoryRepository, ResultRepository, ResultRow, ResultRowId, StorageError,
};

const GIT_SOURCE: &str = r#"{
    "questions": [
        {
            "question": "Which commands stage changes?",
            "options": [
                { "text": "git add .", "isCorrect": true },
                { "text": "git add -A", "isCorrect": true },
                { "text": "git push" }
            ]
        },
        {
            "question": "What does git clone do?",
            "options": [
                { "text": "Copies a repository", "isCorrect": true },
                { "label": "Deletes a repository" }
            ]
        }
    ]
}"#;

fn two_question_pool() -> Arc<QuestionPool> {
    Arc::new(
        PoolBuilder::new()
            .with_topic_json("git", &[GIT_SOURCE])
            .unwrap()
            .build(),
    )
}

fn config(cap: usize, seconds: u32) -> QuizConfig {
    QuizConfig {
        questions_per_attempt: cap,
        time_per_question_seconds: seconds,
        ..QuizConfig::default()
    }
}

fn flow(repo: Arc<dyn ResultRepository>, identity: FixedIdentity) -> QuizFlow {
    QuizFlow::new(
        Clock::fixed(fixed_now()),
        config(5, 10),
        two_question_pool(),
        Arc::new(identity),
        repo,
    )
}

/// Repository double whose appends always fail.
#[derive(Clone, Default)]
struct FailingRepository;

#[async_trait]
impl ResultRepository for FailingRepository {
    async fn append_result(&self, _record: &ResultRecord) -> Result<ResultRowId, StorageError> {
        Err(StorageError::Connection("sink offline".into()))
    }

    async fn get_result(&self, _id: ResultRowId) -> Result<ResultRow, StorageError> {
        Err(StorageError::NotFound)
    }

    async fn list_recent(
        &self,
        _user: &UserId,
        _limit: usize,
    ) -> Result<Vec<ResultRow>, StorageError> {
        Ok(Vec::new())
    }

    async fn latest_for(&self, _user: &UserId) -> Result<Option<ResultRow>, StorageError> {
        Ok(None)
    }
}

#[tokio::test]
async fn end_to_end_attempt_scores_and_persists() {
    let repo = Arc::new(InMemoryRepository::new());
    let flow = flow(repo.clone(), FixedIdentity::user("uid-1"));

    let mut session = flow
        .start_attempt_with_rng(&["git".into()], &mut StdRng::seed_from_u64(1))
        .unwrap();

    // Pool holds 2 questions, cap is 5: the attempt shrinks, timer is 10s each.
    assert_eq!(session.total_questions(), 2);
    assert_eq!(session.remaining_seconds(), 20);

    // Answer the staging question (pool id git_0_0) with both of its correct
    // options, leave the clone question untouched. Toggling is cursor
    // independent, so the shuffle order does not matter here.
    session
        .toggle_option(
            &QuestionId::new("git_0_0"),
            &OptionId::new("git_0_0_opt_0"),
        )
        .unwrap();
    session
        .toggle_option(
            &QuestionId::new("git_0_0"),
            &OptionId::new("git_0_0_opt_1"),
        )
        .unwrap();

    let record = flow.submit_attempt(&mut session).await.unwrap();

    assert_eq!(record.score(), 1);
    assert_eq!(record.tally().correct_count, 1);
    assert_eq!(record.tally().wrong_count, 0);
    assert_eq!(record.tally().skipped_count, 1);
    assert_eq!(record.total_questions(), 2);
    assert_eq!(record.reason(), SubmitReason::Manual);

    let persisted = repo
        .latest_for(&UserId::new("uid-1"))
        .await
        .unwrap()
        .expect("record persisted");
    assert_eq!(persisted.record.attempt_id(), record.attempt_id());
}

#[tokio::test]
async fn timeout_auto_submits_and_persists_once() {
    let repo = Arc::new(InMemoryRepository::new());
    let flow = flow(repo.clone(), FixedIdentity::user("uid-1"));

    let mut session = flow
        .start_attempt_with_rng(&["git".into()], &mut StdRng::seed_from_u64(1))
        .unwrap();

    let mut fired = None;
    for _ in 0..20 {
        fired = flow.tick(&mut session).await.unwrap();
    }
    let record = fired.expect("timeout fired on the last tick");
    assert_eq!(record.reason(), SubmitReason::Timeout);
    assert_eq!(record.tally().skipped_count, 2);

    // Ticks and submits after completion change nothing.
    assert!(flow.tick(&mut session).await.unwrap().is_none());
    let again = flow.submit_attempt(&mut session).await.unwrap();
    assert_eq!(again.attempt_id(), record.attempt_id());

    let rows = repo
        .list_recent(&UserId::new("uid-1"), 10)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn empty_topic_selection_is_refused() {
    let flow = flow(
        Arc::new(InMemoryRepository::new()),
        FixedIdentity::user("uid-1"),
    );

    let err = flow.start_attempt(&[]).unwrap_err();
    assert!(matches!(err, SessionError::NoTopics));

    let err = flow.start_attempt(&["unknown-topic".into()]).unwrap_err();
    assert!(matches!(err, SessionError::Empty));
}

#[tokio::test]
async fn persistence_failure_does_not_block_completion() {
    let flow = flow(Arc::new(FailingRepository), FixedIdentity::user("uid-1"));

    let mut session = flow
        .start_attempt_with_rng(&["git".into()], &mut StdRng::seed_from_u64(1))
        .unwrap();
    let record = flow.submit_attempt(&mut session).await.unwrap();

    assert!(session.is_complete());
    assert_eq!(record.total_questions(), 2);
}

#[tokio::test]
async fn anonymous_attempt_completes_without_saving() {
    let repo = Arc::new(InMemoryRepository::new());
    let flow = flow(repo.clone(), FixedIdentity::anonymous());

    let mut session = flow
        .start_attempt_with_rng(&["git".into()], &mut StdRng::seed_from_u64(1))
        .unwrap();
    let record = flow.submit_attempt(&mut session).await.unwrap();

    assert!(record.user_id().is_none());
    assert!(session.is_complete());
    assert!(
        repo.latest_for(&UserId::new("uid-1"))
            .await
            .unwrap()
            .is_none()
    );
}
