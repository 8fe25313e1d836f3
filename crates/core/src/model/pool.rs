use std::collections::HashMap;

use crate::model::Question;

/// Topic-keyed question pools, built once at startup and read-only for the
/// rest of the process. Sharing it across attempts needs no locking.
#[derive(Debug, Clone, Default)]
pub struct QuestionPool {
    topics: HashMap<String, Vec<Question>>,
}

impl QuestionPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the questions for a topic, replacing any previous entry.
    pub fn insert_topic(&mut self, topic: impl Into<String>, questions: Vec<Question>) {
        self.topics.insert(topic.into(), questions);
    }

    /// Questions for a topic, in pool order. Unknown topics yield `None`.
    #[must_use]
    pub fn topic(&self, topic: &str) -> Option<&[Question]> {
        self.topics.get(topic).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains_topic(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    /// Number of registered topics.
    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
