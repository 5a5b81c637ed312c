use std::collections::HashSet;

use crate::{CatalogError, Question, QuestionKind};

/// The fixed, ordered catalog of questions of one survey.
///
/// A `QuestionSet` is validated on construction: it is never empty, question
/// ids and texts are unique (the text keys the answer store), and every
/// choice question offers at least one option, each listed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    /// Optional message shown before the first question.
    prelude: Option<String>,

    questions: Vec<Question>,

    /// Optional message shown once answers have been submitted.
    epilogue: Option<String>,
}

impl QuestionSet {
    /// Create a survey from its questions, checking the catalog.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut ids = HashSet::new();
        let mut texts = HashSet::new();
        for question in &questions {
            if !ids.insert(question.id()) {
                return Err(CatalogError::DuplicateId(question.id().to_string()));
            }
            if !texts.insert(question.text()) {
                return Err(CatalogError::DuplicateText(question.text().to_string()));
            }
            if let QuestionKind::SingleSelect(choice) | QuestionKind::MultiSelect(choice) =
                question.kind()
            {
                if choice.options.is_empty() {
                    return Err(CatalogError::NoOptions(question.id().to_string()));
                }
                let mut seen = HashSet::new();
                for option in &choice.options {
                    if !seen.insert(option.as_str()) {
                        return Err(CatalogError::DuplicateOption {
                            question: question.id().to_string(),
                            option: option.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self {
            prelude: None,
            questions,
            epilogue: None,
        })
    }

    /// Set the prelude message.
    pub fn with_prelude(mut self, prelude: impl Into<String>) -> Self {
        self.prelude = Some(prelude.into());
        self
    }

    /// Set the epilogue message.
    pub fn with_epilogue(mut self, epilogue: impl Into<String>) -> Self {
        self.epilogue = Some(epilogue.into());
        self
    }

    pub fn prelude(&self) -> Option<&str> {
        self.prelude.as_deref()
    }

    pub fn epilogue(&self) -> Option<&str> {
        self.epilogue.as_deref()
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Index of the question with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }

    /// Get the number of questions. Always at least one.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Index of the last question.
    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yes_no(id: &str, text: &str) -> Question {
        Question::single_select(id, text, ["Yes", "No"])
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(QuestionSet::new(Vec::new()), Err(CatalogError::Empty));
    }

    #[test]
    fn duplicate_text_is_rejected() {
        let result = QuestionSet::new(vec![yes_no("q1", "Again?"), yes_no("q2", "Again?")]);
        assert_eq!(result, Err(CatalogError::DuplicateText("Again?".into())));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let result = QuestionSet::new(vec![yes_no("q1", "One?"), yes_no("q1", "Two?")]);
        assert_eq!(result, Err(CatalogError::DuplicateId("q1".into())));
    }

    #[test]
    fn choice_without_options_is_rejected() {
        let empty: [&str; 0] = [];
        let result = QuestionSet::new(vec![Question::multi_select("q5", "Which?", empty)]);
        assert_eq!(result, Err(CatalogError::NoOptions("q5".into())));
    }

    #[test]
    fn duplicate_option_is_rejected() {
        let result = QuestionSet::new(vec![Question::single_select("q1", "A?", ["Yes", "Yes"])]);
        assert!(matches!(result, Err(CatalogError::DuplicateOption { .. })));
    }

    #[test]
    fn prelude_and_epilogue() {
        let set = QuestionSet::new(vec![yes_no("q1", "Again?")])
            .unwrap()
            .with_prelude("Welcome")
            .with_epilogue("Thanks");
        assert_eq!(set.prelude(), Some("Welcome"));
        assert_eq!(set.epilogue(), Some("Thanks"));
        assert_eq!(set.last_index(), 0);
        assert_eq!(set.position("q1"), Some(0));
    }
}
