use std::collections::BTreeSet;

use quiz_core::config::ScoringRule;
use quiz_core::model::{Question, ScoreTally, SelectionState, Verdict, VerdictKind};

/// Pure scoring over a fixed question set and the learner's selections.
///
/// An untouched question is skipped; a pick that equals the correct-option
/// set exactly (same members, same size) is correct; any other non-empty
/// pick is wrong. The three counts always partition the question set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    rule: ScoringRule,
}

impl ScoringEngine {
    #[must_use]
    pub fn new(rule: ScoringRule) -> Self {
        Self { rule }
    }

    #[must_use]
    pub fn rule(&self) -> ScoringRule {
        self.rule
    }

    /// Score an attempt, producing the tally and one verdict per question in
    /// question order.
    #[must_use]
    pub fn score(
        &self,
        questions: &[Question],
        selections: &SelectionState,
    ) -> (ScoreTally, Vec<Verdict>) {
        let mut tally = ScoreTally::default();
        let mut verdicts = Vec::with_capacity(questions.len());

        for question in questions {
            let correct_ids = question.correct_option_ids();
            let picked = selections.picked_for(&question.id);

            let kind = if picked.is_empty() {
                tally.skipped_count += 1;
                tally.score += self.rule.skipped;
                VerdictKind::Skipped
            } else {
                let picked_set: BTreeSet<_> = picked.iter().collect();
                let correct_set: BTreeSet<_> = correct_ids.iter().collect();
                if picked_set == correct_set {
                    tally.correct_count += 1;
                    tally.score += self.rule.correct;
                    VerdictKind::Correct
                } else {
                    tally.wrong_count += 1;
                    tally.score += self.rule.wrong;
                    VerdictKind::Wrong
                }
            };

            verdicts.push(Verdict {
                question_id: question.id.clone(),
                question_text: question.text.clone(),
                options: question.options.clone(),
                correct_option_ids: correct_ids,
                selected_option_ids: picked,
                verdict: kind,
            });
        }

        (tally, verdicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerOption, OptionId, QuestionId};

    // Options a and b are correct, c is wrong.
    fn question() -> Question {
        Question {
            id: QuestionId::new("q1"),
            topic: "git".into(),
            text: "Pick both".into(),
            options: vec![
                AnswerOption {
                    id: OptionId::new("a"),
                    text: "A".into(),
                    is_correct: true,
                },
                AnswerOption {
                    id: OptionId::new("b"),
                    text: "B".into(),
                    is_correct: true,
                },
                AnswerOption {
                    id: OptionId::new("c"),
                    text: "C".into(),
                    is_correct: false,
                },
            ],
        }
    }

    fn select(ids: &[&str]) -> SelectionState {
        let mut state = SelectionState::new();
        for id in ids {
            state.toggle(&QuestionId::new("q1"), &OptionId::new(*id));
        }
        state
    }

    fn engine() -> ScoringEngine {
        ScoringEngine::new(ScoringRule::default())
    }

    #[test]
    fn exact_match_is_correct() {
        let (tally, verdicts) = engine().score(&[question()], &select(&["a", "b"]));
        assert_eq!(tally.score, 1);
        assert_eq!(tally.correct_count, 1);
        assert_eq!(verdicts[0].verdict, VerdictKind::Correct);
        assert!(verdicts[0].is_correct());
    }

    #[test]
    fn subset_is_wrong() {
        let (tally, verdicts) = engine().score(&[question()], &select(&["a"]));
        assert_eq!(tally.score, -2);
        assert_eq!(tally.wrong_count, 1);
        assert_eq!(verdicts[0].verdict, VerdictKind::Wrong);
    }

    #[test]
    fn superset_is_wrong() {
        let (tally, _) = engine().score(&[question()], &select(&["a", "b", "c"]));
        assert_eq!(tally.score, -2);
        assert_eq!(tally.wrong_count, 1);
    }

    #[test]
    fn empty_selection_is_skipped() {
        let (tally, verdicts) = engine().score(&[question()], &SelectionState::new());
        assert_eq!(tally.score, 0);
        assert_eq!(tally.skipped_count, 1);
        assert_eq!(verdicts[0].verdict, VerdictKind::Skipped);
    }

    #[test]
    fn toggled_off_selection_scores_as_skipped() {
        let mut state = select(&["a"]);
        state.toggle(&QuestionId::new("q1"), &OptionId::new("a"));
        let (tally, _) = engine().score(&[question()], &state);
        assert_eq!(tally.skipped_count, 1);
    }

    #[test]
    fn zero_option_question_cannot_be_correct() {
        let bare = Question {
            id: QuestionId::new("q1"),
            topic: "git".into(),
            text: "".into(),
            options: Vec::new(),
        };

        let (tally, _) = engine().score(&[bare.clone()], &SelectionState::new());
        assert_eq!(tally.skipped_count, 1);

        // A stray pick cannot equal the empty correct set.
        let (tally, _) = engine().score(&[bare], &select(&["ghost"]));
        assert_eq!(tally.wrong_count, 1);
    }

    #[test]
    fn counts_partition_the_question_set() {
        let questions: Vec<Question> = (0..3)
            .map(|i| {
                let mut q = question();
                q.id = QuestionId::new(format!("q{i}"));
                q
            })
            .collect();

        let mut state = SelectionState::new();
        // q0 correct, q1 wrong, q2 untouched.
        state.toggle(&QuestionId::new("q0"), &OptionId::new("a"));
        state.toggle(&QuestionId::new("q0"), &OptionId::new("b"));
        state.toggle(&QuestionId::new("q1"), &OptionId::new("c"));

        let (tally, verdicts) = engine().score(&questions, &state);
        assert_eq!(tally.classified_count() as usize, verdicts.len());
        assert_eq!(
            (tally.correct_count, tally.wrong_count, tally.skipped_count),
            (1, 1, 1)
        );
        assert_eq!(tally.score, 1 - 2);
    }

    #[test]
    fn verdicts_echo_selection_and_correct_ids() {
        let (_, verdicts) = engine().score(&[question()], &select(&["b", "c"]));
        let v = &verdicts[0];
        assert_eq!(v.correct_option_ids, vec![OptionId::new("a"), OptionId::new("b")]);
        assert_eq!(v.selected_option_ids, vec![OptionId::new("b"), OptionId::new("c")]);
        assert_eq!(v.options.len(), 3);
    }
}
