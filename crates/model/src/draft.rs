use crate::question::{Answer, Key, Question};
use alloc::{string::String, vec::Vec};
use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};

/// Acceptable schema for creating or editing a quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Draft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
    /// Whether answerers see the questions in a random order.
    #[serde(default)]
    pub shuffle_questions: bool,
}

/// Reasons for rejecting a draft. Question numbers are one-based.
#[derive(Debug, PartialEq, Eq)]
pub enum DraftError {
    EmptyTitle,
    NoQuestions,
    EmptyQuestion(usize),
    MissingAnswer(usize),
    TooFewChoices(usize),
    EmptyChoice(usize),
    AnswerOutOfRange(usize),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => f.write_str("Please enter a quiz title"),
            Self::NoQuestions => f.write_str("Please add at least one question"),
            Self::EmptyQuestion(n) => write!(f, "Question {n} is empty"),
            Self::MissingAnswer(n) => write!(f, "Question {n} needs at least one correct answer"),
            Self::TooFewChoices(n) => write!(f, "Question {n} needs at least two choices"),
            Self::EmptyChoice(n) => write!(f, "Question {n} has empty choices"),
            Self::AnswerOutOfRange(n) => write!(f, "Question {n} has an answer outside its choices"),
        }
    }
}

fn trim_in_place(text: &mut String) {
    let trimmed = text.trim();
    if trimmed.len() != text.len() {
        *text = String::from(trimmed);
    }
}

fn validate_question(number: usize, question: &mut Question) -> Result<(), DraftError> {
    match question {
        Question::Identification { question, correct_answers } => {
            trim_in_place(question);
            if question.is_empty() {
                return Err(DraftError::EmptyQuestion(number));
            }

            correct_answers.retain(|answer| !answer.trim().is_empty());
            correct_answers.iter_mut().for_each(trim_in_place);
            if correct_answers.is_empty() {
                return Err(DraftError::MissingAnswer(number));
            }
        }
        Question::MultipleChoice { question, choices, answer } => {
            trim_in_place(question);
            if question.is_empty() {
                return Err(DraftError::EmptyQuestion(number));
            }

            if choices.len() < 2 {
                return Err(DraftError::TooFewChoices(number));
            }

            choices.iter_mut().for_each(trim_in_place);
            if choices.iter().any(String::is_empty) {
                return Err(DraftError::EmptyChoice(number));
            }

            let in_range = |index: &u32| usize::try_from(*index).map_or(false, |i| i < choices.len());
            match &*answer {
                Key::Single(index) if !in_range(index) => return Err(DraftError::AnswerOutOfRange(number)),
                Key::Multiple(indices) if indices.is_empty() => return Err(DraftError::MissingAnswer(number)),
                Key::Multiple(indices) if !indices.iter().all(|index| in_range(index)) => {
                    return Err(DraftError::AnswerOutOfRange(number))
                }
                _ => (),
            }
        }
    }
    Ok(())
}

impl Draft {
    /// Checks the draft in authoring order and returns it with all text trimmed. Blank
    /// alternatives of identification questions are dropped.
    pub fn validate(mut self) -> Result<Self, DraftError> {
        trim_in_place(&mut self.title);
        if self.title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }

        trim_in_place(&mut self.description);
        if self.questions.is_empty() {
            return Err(DraftError::NoQuestions);
        }

        for (question, number) in self.questions.iter_mut().zip(1..) {
            validate_question(number, question)?;
        }

        Ok(self)
    }
}

/// Reasons for rejecting a set of answers before grading. Question numbers are one-based and
/// refer to the original question order.
#[derive(Debug, PartialEq, Eq)]
pub enum AttemptError {
    Length { expected: usize, found: usize },
    Unanswered(usize),
    WrongKind(usize),
}

impl Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { expected, found } => write!(f, "Expected {expected} answers but found {found}"),
            Self::Unanswered(n) => write!(f, "Please answer question {n}"),
            Self::WrongKind(n) => write!(f, "Question {n} has an answer of the wrong kind"),
        }
    }
}

/// Ensures that every question has a non-blank answer of the right kind.
pub fn check_answers(questions: &[Question], answers: &[Option<Answer>]) -> Result<(), AttemptError> {
    if questions.len() != answers.len() {
        return Err(AttemptError::Length { expected: questions.len(), found: answers.len() });
    }

    for ((question, answer), number) in questions.iter().zip(answers).zip(1..) {
        let answer = match answer {
            Some(answer) if !answer.is_blank() => answer,
            _ => return Err(AttemptError::Unanswered(number)),
        };
        if !answer.fits(question) {
            return Err(AttemptError::WrongKind(number));
        }
    }

    Ok(())
}
