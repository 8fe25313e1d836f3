use serde::{Deserialize, Serialize};

use crate::model::{OptionId, QuestionId};

/// Answer mode, derived from the correct-option count rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionMode {
    Single,
    Multiple,
}

/// One selectable answer. Immutable once the question is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

/// A normalized quiz question.
///
/// Malformed sources can legitimately produce a question with no options;
/// scoring handles that case, construction does not reject it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub topic: String,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// `Single` if exactly one option is correct, `Multiple` otherwise.
    #[must_use]
    pub fn mode(&self) -> QuestionMode {
        let correct = self.options.iter().filter(|o| o.is_correct).count();
        if correct == 1 {
            QuestionMode::Single
        } else {
            QuestionMode::Multiple
        }
    }

    /// Ids of all correct options, in option order.
    #[must_use]
    pub fn correct_option_ids(&self) -> Vec<OptionId> {
        self.options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.id.clone())
            .collect()
    }

    /// Key used for pool-level deduplication: the id when present, the
    /// question text otherwise, trimmed and lowercased.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        let base = if self.id.is_empty() {
            &self.text
        } else {
            self.id.as_str()
        };
        base.trim().to_lowercase()
    }
}
