use quiz_core::model::{AnswerOption, OptionId, Question, QuestionId, QuestionPool, RawFile};

use crate::error::PoolError;

/// Parse one raw source file from its JSON text.
///
/// Missing fields inside records are tolerated; only syntactically broken
/// JSON is an error.
///
/// # Errors
///
/// Returns `PoolError::Parse` when the text is not valid JSON for the
/// source shape.
pub fn parse_raw_file(json: &str) -> Result<RawFile, PoolError> {
    Ok(serde_json::from_str(json)?)
}

/// Merges raw per-source question lists into normalized topic pools.
///
/// Ids are synthesized from the source layout so identical runs over
/// identical input produce identical ids. Malformed records are normalized
/// to safe defaults rather than rejected; a record with zero options becomes
/// a question with an empty option list.
#[derive(Debug, Default)]
pub struct PoolBuilder {
    topics: Vec<(String, Vec<RawFile>)>,
}

impl PoolBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the raw source files for a topic, in source order.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>, files: Vec<RawFile>) -> Self {
        self.topics.push((topic.into(), files));
        self
    }

    /// Queue a topic from JSON source texts.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Parse` when any source text is not valid JSON.
    pub fn with_topic_json(self, topic: impl Into<String>, sources: &[&str]) -> Result<Self, PoolError> {
        let files = sources
            .iter()
            .map(|json| parse_raw_file(json))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.with_topic(topic, files))
    }

    /// Build the process-wide question pool.
    #[must_use]
    pub fn build(self) -> QuestionPool {
        let mut pool = QuestionPool::new();
        for (topic, files) in self.topics {
            let questions = Self::build_topic(&topic, &files);
            pool.insert_topic(topic, questions);
        }
        pool
    }

    /// Normalize one topic's sources into an ordered question list.
    ///
    /// Iterates sources then records in given order and stamps the question
    /// id `<topic>_<sourceIndex>_<recordIndex>` with option ids
    /// `<questionId>_opt_<optionIndex>`.
    #[must_use]
    pub fn build_topic(topic: &str, files: &[RawFile]) -> Vec<Question> {
        let mut questions = Vec::new();

        for (file_index, file) in files.iter().enumerate() {
            for (record_index, raw) in file.questions.iter().enumerate() {
                let question_id = format!("{topic}_{file_index}_{record_index}");

                let options = raw
                    .options
                    .iter()
                    .enumerate()
                    .map(|(option_index, opt)| AnswerOption {
                        id: OptionId::new(format!("{question_id}_opt_{option_index}")),
                        text: opt.display_text().to_owned(),
                        is_correct: opt.is_correct,
                    })
                    .collect();

                questions.push(Question {
                    id: QuestionId::new(question_id),
                    topic: topic.to_owned(),
                    text: raw.question.clone().unwrap_or_default(),
                    options,
                });
            }
        }

        questions
    }
}
