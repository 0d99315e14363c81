//! What an answerer gets to see: the prompts in presentation order without any answer keys.

use crate::{
    order::{self, Order},
    question::{Key, Question},
    quiz::Quiz,
};
use alloc::{string::String, vec::Vec};
use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Prompt<'q> {
    Identification {
        question: &'q str,
    },
    MultipleChoice {
        question: &'q str,
        choices: &'q [String],
        /// Whether several choices may be selected.
        multiple: bool,
    },
}

impl<'q> From<&'q Question> for Prompt<'q> {
    fn from(question: &'q Question) -> Self {
        match question {
            Question::Identification { question, .. } => Self::Identification { question },
            Question::MultipleChoice { question, choices, answer } => {
                Self::MultipleChoice { question, choices, multiple: matches!(answer, Key::Multiple(_)) }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Sheet<'q> {
    pub id: i64,
    pub title: &'q str,
    pub description: &'q str,
    /// Original index of each prompt. Clients send this back along with their answers.
    pub order: &'q Order,
    pub prompts: Vec<Prompt<'q>>,
}

impl<'q> Sheet<'q> {
    pub fn new(quiz: &'q Quiz, order: &'q Order) -> Result<Self, order::Error> {
        let prompts = order.present(&quiz.questions)?.into_iter().map(Prompt::from).collect();
        Ok(Self { id: quiz.id, title: &quiz.title, description: &quiz.description, order, prompts })
    }
}
