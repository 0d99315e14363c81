use crate::question::{Answer, Question};
use serde::{Deserialize, Serialize};

/// Result of grading one submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Score {
    /// Number of correctly answered questions.
    pub correct: u32,
    /// Number of questions in the quiz.
    pub total: u32,
    /// `correct / total` as a whole percentage, rounded half-up.
    pub percentage: u8,
}

impl Score {
    /// Builds a score from its counts. `correct` is capped at `total`.
    pub fn new(correct: u32, total: u32) -> Self {
        let correct = correct.min(total);
        let percentage = rounded_percent(correct.into(), total.into()) as u8;
        Self { correct, total, percentage }
    }
}

/// Computes `round(num / den)` with halves rounded up. A zero denominator yields zero.
pub(crate) fn rounded_div(num: u64, den: u64) -> u64 {
    if den == 0 {
        return 0;
    }
    (2 * num + den) / (2 * den)
}

/// Computes `round(100 * part / whole)`.
pub(crate) fn rounded_percent(part: u64, whole: u64) -> u64 {
    rounded_div(100 * part, whole)
}

/// Grades the answers against the questions. The answers must already be in the original
/// question order. Missing trailing answers count as unanswered and extra answers are ignored.
pub fn score(questions: &[Question], answers: &[Option<Answer>]) -> Score {
    let correct = questions
        .iter()
        .enumerate()
        .filter(|&(i, question)| question.is_correct(answers.get(i).and_then(Option::as_ref)))
        .count();

    // Quizzes never come close to `u32::MAX` questions.
    let total = questions.len() as u32;
    Score::new(correct as u32, total)
}
