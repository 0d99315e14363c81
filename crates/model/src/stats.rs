//! Simple aggregates over the submissions of a quiz.

use crate::{
    question::Question,
    quiz::Submission,
    score::{rounded_div, rounded_percent, Score},
};
use alloc::vec::Vec;
use serde::Serialize;

/// Percentage at which a submission counts as passing.
pub const PASSING: u8 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub responses: u32,
    /// Mean percentage, rounded.
    pub average: u8,
    pub highest: u8,
    pub lowest: u8,
    /// Share of passing submissions as a rounded percentage.
    pub pass_rate: u8,
}

impl Summary {
    /// Returns `None` when there are no scores to summarize.
    pub fn new<'s, I>(scores: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'s Score>,
    {
        let mut responses = 0_u32;
        let mut total = 0_u64;
        let mut passed = 0_u64;
        let mut highest = u8::MIN;
        let mut lowest = u8::MAX;

        for &Score { percentage, .. } in scores {
            responses += 1;
            total += u64::from(percentage);
            passed += u64::from(percentage >= PASSING);
            highest = highest.max(percentage);
            lowest = lowest.min(percentage);
        }

        if responses == 0 {
            return None;
        }

        let count = u64::from(responses);
        Some(Self {
            responses,
            average: rounded_div(total, count) as u8,
            highest,
            lowest,
            pass_rate: rounded_percent(passed, count) as u8,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionStats {
    pub correct: u32,
    pub incorrect: u32,
    /// Share of submissions that got this question right. Zero without submissions.
    pub percentage: u8,
}

/// Regrades every submission question by question against the current questions.
pub fn breakdown(questions: &[Question], submissions: &[Submission]) -> Vec<QuestionStats> {
    let responses = submissions.len() as u32;
    questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let correct = submissions
                .iter()
                .filter(|sub| question.is_correct(sub.answers.get(i).and_then(Option::as_ref)))
                .count() as u32;
            QuestionStats {
                correct,
                incorrect: responses - correct,
                percentage: rounded_percent(correct.into(), responses.into()) as u8,
            }
        })
        .collect()
}
