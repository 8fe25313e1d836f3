use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use quiz_core::model::{OptionId, Question, QuestionPool};

/// Selection result for one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptPlan {
    pub questions: Vec<Question>,
    /// Later duplicates dropped during deduplication.
    pub duplicates_dropped: usize,
}

impl AttemptPlan {
    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Returns true when no questions were selected for this attempt.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Builds the question set for one attempt from the shared pool.
///
/// The pipeline is: concatenate the requested topic pools in caller order,
/// deduplicate (first occurrence wins), shuffle the full deduplicated set,
/// then cap. Shuffling before truncation makes the cap sample uniformly
/// from the whole union; truncate-then-shuffle would bias toward the first
/// topics.
pub struct AttemptSelector<'a> {
    pool: &'a QuestionPool,
    cap: usize,
}

impl<'a> AttemptSelector<'a> {
    #[must_use]
    pub fn new(pool: &'a QuestionPool, cap: usize) -> Self {
        Self { pool, cap }
    }

    /// Select the ordered question set for one attempt.
    ///
    /// Topics missing from the pool are skipped; an empty `topics` slice
    /// yields an empty plan, which the session controller refuses to start.
    /// If the union is smaller than the cap the attempt silently shrinks.
    #[must_use]
    pub fn select<R: Rng + ?Sized>(&self, topics: &[String], rng: &mut R) -> AttemptPlan {
        let mut merged: Vec<Question> = Vec::new();
        for topic in topics {
            if let Some(questions) = self.pool.topic(topic) {
                merged.extend(questions.iter().cloned());
            }
        }

        let mut seen = HashSet::new();
        let before = merged.len();
        let mut unique: Vec<Question> = Vec::with_capacity(before);
        for question in merged {
            if seen.insert(question.dedup_key()) {
                unique.push(question);
            }
        }
        let duplicates_dropped = before - unique.len();

        unique.as_mut_slice().shuffle(rng);
        unique.truncate(self.cap.min(unique.len()));

        for question in &mut unique {
            restamp_option_ids(question);
        }

        AttemptPlan {
            questions: unique,
            duplicates_dropped,
        }
    }
}

/// Guarantee option-id uniqueness within a question, independent of builder
/// output. A no-op when ids are already unique and non-empty.
fn restamp_option_ids(question: &mut Question) {
    let mut seen = HashSet::new();
    let unique = question
        .options
        .iter()
        .all(|o| !o.id.is_empty() && seen.insert(o.id.clone()));
    if unique {
        return;
    }

    for (index, option) in question.options.iter_mut().enumerate() {
        option.id = OptionId::new(format!("{}_opt_{index}", question.id));
    }
}
