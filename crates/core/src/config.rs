use serde::{Deserialize, Serialize};

/// Per-question score contributions.
///
/// The reference rule rewards an exact answer with `+1` and penalizes a wrong
/// one with `-2`, so guessing is net-negative whenever more than one wrong
/// option exists. An untouched question contributes `skipped`; whether that
/// should instead count as wrong is a configuration choice, not engine logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub correct: i64,
    pub wrong: i64,
    pub skipped: i64,
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self {
            correct: 1,
            wrong: -2,
            skipped: 0,
        }
    }
}

/// Static quiz configuration, injected at construction and never mutated
/// during an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    /// Maximum questions per attempt; a smaller pool shrinks the attempt.
    pub questions_per_attempt: usize,
    /// Per-question time budget; the global timer is this times the realized
    /// question count.
    pub time_per_question_seconds: u32,
    pub scoring: ScoringRule,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_per_attempt: 30,
            time_per_question_seconds: 10,
            scoring: ScoringRule::default(),
        }
    }
}

impl QuizConfig {
    /// Global countdown budget for an attempt of `question_count` questions.
    #[must_use]
    pub fn total_time_for(&self, question_count: usize) -> u32 {
        let count = u32::try_from(question_count).unwrap_or(u32::MAX);
        self.time_per_question_seconds.saturating_mul(count)
    }
}
