use crate::{
    question::{Answer, Question},
    score::Score,
};
use alloc::{string::String, vec::Vec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A quiz as persisted in the store.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: i64,
    /// Join code of the shape `AAAAA-BBBBB`.
    pub code: String,
    /// Opaque user ID of the owner.
    pub creator: String,
    pub creator_name: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub shuffle_questions: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One user's graded answers to a quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Submission {
    pub id: i64,
    pub quiz: i64,
    /// Opaque user ID of the answerer.
    pub author: String,
    pub author_name: String,
    /// Answers in the original question order.
    pub answers: Vec<Option<Answer>>,
    pub score: Score,
    pub submitted_at: DateTime<Utc>,
}

/// Answers as posted by a client.
#[derive(Debug, Deserialize)]
pub struct Attempt {
    pub answers: Vec<Option<Answer>>,
    /// Presentation order used while answering. When present, `answers` follow this order and
    /// must be restored before grading.
    #[serde(default)]
    pub order: Option<crate::Order>,
}

impl Quiz {
    pub fn is_owned_by(&self, user: &str) -> bool {
        self.creator == user
    }
}
