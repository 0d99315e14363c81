use alloc::{collections::BTreeSet, string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// A single question in a quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Question {
    /// Free-text question graded against a list of accepted answers.
    Identification {
        /// Prompt to be displayed.
        question: String,
        /// Any of these is accepted, ignoring case and surrounding whitespace.
        correct_answers: Vec<String>,
    },
    /// Fixed list of choices graded by index.
    MultipleChoice {
        /// Prompt to be displayed.
        question: String,
        /// Possible answers to select from.
        choices: Vec<String>,
        /// Which of the choices are correct.
        answer: Key,
    },
}

/// Correctness key of a multiple-choice question.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    /// Exactly one choice is correct.
    Single(u32),
    /// The answerer must select exactly this set of choices.
    Multiple(BTreeSet<u32>),
}

/// What a user submitted for one question. An unanswered question is represented by the
/// absence of an [`Answer`] altogether.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Choice(u32),
    Choices(BTreeSet<u32>),
}

/// Canonical form of a free-text answer: trimmed and lower-cased.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl Question {
    pub fn prompt(&self) -> &str {
        match self {
            Self::Identification { question, .. } | Self::MultipleChoice { question, .. } => question,
        }
    }

    /// Grades a single answer. Anything that does not match the key, including answers of the
    /// wrong kind and out-of-range indices, counts as incorrect.
    pub fn is_correct(&self, answer: Option<&Answer>) -> bool {
        match self {
            Self::Identification { correct_answers, .. } => {
                let text = match answer {
                    Some(Answer::Text(text)) => text.as_str(),
                    None => "",
                    _ => return false,
                };
                let given = normalize(text);
                correct_answers.iter().any(|accepted| normalize(accepted) == given)
            }
            Self::MultipleChoice { answer: Key::Single(index), .. } => matches!(answer, Some(Answer::Choice(choice)) if choice == index),
            Self::MultipleChoice { answer: Key::Multiple(indices), .. } => match answer {
                Some(Answer::Choices(choices)) => choices == indices,
                Some(Answer::Choice(choice)) => indices.len() == 1 && indices.contains(choice),
                Some(Answer::Text(_)) => false,
                None => indices.is_empty(),
            },
        }
    }
}

impl Answer {
    /// Whether this answer has the shape the question expects at all.
    pub fn fits(&self, question: &Question) -> bool {
        match (question, self) {
            (Question::Identification { .. }, Self::Text(_)) => true,
            (Question::MultipleChoice { answer: Key::Single(_), .. }, Self::Choice(_)) => true,
            (Question::MultipleChoice { answer: Key::Multiple(_), .. }, Self::Choice(_) | Self::Choices(_)) => true,
            _ => false,
        }
    }

    /// Whether the answer carries nothing, e.g. blank text or an empty selection.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Choice(_) => false,
            Self::Choices(choices) => choices.is_empty(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::vec;

    pub(crate) fn capital() -> Question {
        Question::Identification {
            question: String::from("What is the capital of France?"),
            correct_answers: vec![String::from("Paris"), String::from("paris, france")],
        }
    }

    pub(crate) fn single() -> Question {
        Question::MultipleChoice {
            question: String::from("Pick B"),
            choices: vec![String::from("A"), String::from("B"), String::from("C")],
            answer: Key::Single(1),
        }
    }

    pub(crate) fn multiple() -> Question {
        Question::MultipleChoice {
            question: String::from("Pick B and D"),
            choices: vec![String::from("A"), String::from("B"), String::from("C"), String::from("D")],
            answer: Key::Multiple(BTreeSet::from([1, 3])),
        }
    }

    fn text(s: &str) -> Answer {
        Answer::Text(String::from(s))
    }

    fn set<const N: usize>(indices: [u32; N]) -> Answer {
        Answer::Choices(BTreeSet::from(indices))
    }

    #[test]
    fn normalization_ignores_case_and_padding() {
        assert_eq!(normalize("  Paris  "), "paris");
        assert_eq!(normalize("PARIS"), normalize("paris"));
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("\tNew  York\n"), "new  york");
    }

    #[test]
    fn identification_matches_any_alternative() {
        let question = capital();
        assert!(question.is_correct(Some(&text("  PARIS "))));
        assert!(question.is_correct(Some(&text("Paris, France"))));
        assert!(!question.is_correct(Some(&text("London"))));
        assert!(!question.is_correct(Some(&text("Paris,France"))));
        assert!(!question.is_correct(None));
        assert!(!question.is_correct(Some(&Answer::Choice(0))));
    }

    #[test]
    fn single_choice_requires_the_exact_index() {
        let question = single();
        assert!(question.is_correct(Some(&Answer::Choice(1))));
        assert!(!question.is_correct(Some(&Answer::Choice(0))));
        assert!(!question.is_correct(None));
        assert!(!question.is_correct(Some(&set([1]))));
    }

    #[test]
    fn multiple_choice_uses_set_equality() {
        let question = multiple();
        assert!(question.is_correct(Some(&set([3, 1]))));
        assert!(!question.is_correct(Some(&set([1]))));
        assert!(!question.is_correct(Some(&set([1, 2, 3]))));
        assert!(!question.is_correct(Some(&Answer::Choice(1))));
        assert!(!question.is_correct(Some(&set([]))));
        assert!(!question.is_correct(None));
    }

    #[test]
    fn lone_choice_is_coerced_into_a_set() {
        let question = Question::MultipleChoice {
            question: String::from("Only C"),
            choices: vec![String::from("A"), String::from("B"), String::from("C")],
            answer: Key::Multiple(BTreeSet::from([2])),
        };
        assert!(question.is_correct(Some(&Answer::Choice(2))));
        assert!(!question.is_correct(Some(&Answer::Choice(1))));
    }

    #[test]
    fn answers_deserialize_from_native_json() {
        let answers: Vec<Option<Answer>> = serde_json::from_str(r#"["paris", 1, [3, 1], null]"#).unwrap();
        assert_eq!(answers, [Some(text("paris")), Some(Answer::Choice(1)), Some(set([1, 3])), None]);
    }

    #[test]
    fn questions_round_trip_through_json() {
        let json = r#"{"type":"multiple-choice","question":"Pick B and D","choices":["A","B","C","D"],"answer":{"multiple":[1,3]}}"#;
        let parsed: Question = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, multiple());
        assert_eq!(serde_json::to_string(&parsed).unwrap(), json);

        let json = r#"{"type":"identification","question":"Q","correct_answers":["a"]}"#;
        let parsed: Question = serde_json::from_str(json).unwrap();
        assert!(matches!(parsed, Question::Identification { .. }));
    }
}
