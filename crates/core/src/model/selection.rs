use std::collections::{BTreeSet, HashMap};

use crate::model::{OptionId, QuestionId};

/// Per-question option selections for one attempt.
///
/// Only questions the learner has touched have an entry; an absent entry and
/// an entry toggled back to empty both read as "no selection" at scoring
/// time. A `BTreeSet` keeps the picked ids in a stable order for verdicts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    by_question: HashMap<QuestionId, BTreeSet<OptionId>>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `option_id` in the set for `question_id`.
    ///
    /// Toggling the same pair twice restores the original state.
    pub fn toggle(&mut self, question_id: &QuestionId, option_id: &OptionId) {
        let entry = self.by_question.entry(question_id.clone()).or_default();
        if !entry.remove(option_id) {
            entry.insert(option_id.clone());
        }
    }

    /// Selected option ids for a question, in sorted order; empty when the
    /// question was never touched.
    #[must_use]
    pub fn picked_for(&self, question_id: &QuestionId) -> Vec<OptionId> {
        self.by_question
            .get(question_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// True when the question currently has at least one selected option.
    #[must_use]
    pub fn has_selection(&self, question_id: &QuestionId) -> bool {
        self.by_question
            .get(question_id)
            .is_some_and(|set| !set.is_empty())
    }

    /// Number of questions with at least one selected option.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.by_question.values().filter(|set| !set.is_empty()).count()
    }
}
