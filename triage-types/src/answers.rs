use indexmap::IndexMap;
use serde::Serialize;

use crate::{AnswerValue, Question, QuestionSet};

/// Error type for answer store writes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("No answer slot for question: {0}")]
    UnknownQuestion(String),

    #[error("Type mismatch for '{question}': expected {expected}, got {actual}")]
    ShapeMismatch {
        question: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Collected answers of a survey.
///
/// Keyed by question text and kept in catalog order. The store always holds
/// exactly one value per question of the set it was created for; values are
/// replaced, never added or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerStore {
    values: IndexMap<String, AnswerValue>,
}

impl AnswerStore {
    /// Create a store with an empty answer of the right shape per question.
    pub fn for_questions(set: &QuestionSet) -> Self {
        let values = set
            .questions()
            .iter()
            .map(|q| (q.text().to_string(), AnswerValue::empty_for(q.kind())))
            .collect();
        Self { values }
    }

    /// Get the answer stored under a question text.
    pub fn get(&self, text: &str) -> Option<&AnswerValue> {
        self.values.get(text)
    }

    /// Get the answer to a question.
    pub fn answer(&self, question: &Question) -> Option<&AnswerValue> {
        self.get(question.text())
    }

    /// Replace the answer to a question.
    pub fn set(&mut self, question: &Question, value: AnswerValue) -> Result<(), AnswerError> {
        let Some(slot) = self.values.get_mut(question.text()) else {
            return Err(AnswerError::UnknownQuestion(question.text().to_string()));
        };
        if !value.fits(question.kind()) {
            return Err(AnswerError::ShapeMismatch {
                question: question.text().to_string(),
                expected: question.kind().name(),
                actual: value.type_name(),
            });
        }
        *slot = value;
        Ok(())
    }

    /// Empty every answer, keeping its shape.
    pub fn clear(&mut self) {
        for value in self.values.values_mut() {
            match value {
                AnswerValue::Text(text) => text.clear(),
                AnswerValue::MultiSelect(selection) => selection.clear(),
            }
        }
    }

    /// Get an iterator over all (question text, answer) pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pretty-printed JSON object of all answers.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NONE_OF_THESE, Selection};

    fn sample() -> QuestionSet {
        QuestionSet::new(vec![
            Question::single_select("q1", "Again?", ["Yes", "No"]),
            Question::multi_select("q2", "Which?", ["Threats", NONE_OF_THESE]),
            Question::free_text("q3", "Details?"),
        ])
        .unwrap()
    }

    #[test]
    fn starts_with_empty_shapes() {
        let set = sample();
        let store = AnswerStore::for_questions(&set);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("Again?"), Some(&AnswerValue::Text(String::new())));
        assert_eq!(
            store.get("Which?"),
            Some(&AnswerValue::MultiSelect(Selection::new()))
        );
    }

    #[test]
    fn set_rejects_wrong_shape() {
        let set = sample();
        let mut store = AnswerStore::for_questions(&set);
        let err = store.set(&set.questions()[1], "Threats".into()).unwrap_err();
        assert!(matches!(err, AnswerError::ShapeMismatch { .. }));
    }

    #[test]
    fn set_rejects_unknown_question() {
        let set = sample();
        let mut store = AnswerStore::for_questions(&set);
        let stranger = Question::free_text("q9", "Who?");
        assert_eq!(
            store.set(&stranger, "me".into()),
            Err(AnswerError::UnknownQuestion("Who?".into()))
        );
    }

    #[test]
    fn clear_restores_initial_state() {
        let set = sample();
        let mut store = AnswerStore::for_questions(&set);
        store.set(&set.questions()[0], "Yes".into()).unwrap();
        store
            .set(&set.questions()[1], Selection::from_iter([NONE_OF_THESE]).into())
            .unwrap();
        store.clear();
        assert_eq!(store, AnswerStore::for_questions(&set));
    }

    #[test]
    fn json_keeps_catalog_order() {
        let set = sample();
        let mut store = AnswerStore::for_questions(&set);
        store.set(&set.questions()[0], "Yes".into()).unwrap();
        store
            .set(&set.questions()[1], Selection::from_iter(["Threats"]).into())
            .unwrap();
        store.set(&set.questions()[2], "at work".into()).unwrap();
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(
            json,
            r#"{"Again?":"Yes","Which?":["Threats"],"Details?":"at work"}"#
        );
    }
}
