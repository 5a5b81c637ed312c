//! Completeness checks run before a survey is submitted.

use crate::{AnswerStore, AnswerValue, Question, QuestionKind, QuestionSet};

/// Check whether a value counts as an answer to a question.
///
/// Single-select needs a non-empty choice, multi-select a non-empty
/// selection, free text something besides whitespace. A value of the wrong
/// shape never counts.
pub fn is_answered(question: &Question, value: &AnswerValue) -> bool {
    match (question.kind(), value) {
        (QuestionKind::SingleSelect(_), AnswerValue::Text(choice)) => !choice.is_empty(),
        (QuestionKind::FreeText(_), AnswerValue::Text(text)) => !text.trim().is_empty(),
        (QuestionKind::MultiSelect(_), AnswerValue::MultiSelect(selection)) => {
            !selection.is_empty()
        }
        _ => false,
    }
}

/// Index of the first question, in catalog order, that has no answer.
pub fn find_first_unanswered(set: &QuestionSet, answers: &AnswerStore) -> Option<usize> {
    set.questions().iter().position(|question| {
        answers
            .answer(question)
            .is_none_or(|value| !is_answered(question, value))
    })
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
    fn empty_values_are_unanswered() {
        let set = sample();
        for question in set.questions() {
            assert!(!is_answered(question, &AnswerValue::empty_for(question.kind())));
        }
    }

    #[test]
    fn whitespace_text_is_unanswered() {
        let set = sample();
        let details = &set.questions()[2];
        assert!(!is_answered(details, &"  \n\t ".into()));
        assert!(is_answered(details, &" at work ".into()));
    }

    #[test]
    fn non_empty_values_are_answered() {
        let set = sample();
        assert!(is_answered(&set.questions()[0], &"No".into()));
        assert!(is_answered(
            &set.questions()[1],
            &Selection::from_iter([NONE_OF_THESE]).into()
        ));
    }

    #[test]
    fn wrong_shape_is_unanswered() {
        let set = sample();
        assert!(!is_answered(&set.questions()[1], &"Threats".into()));
    }

    #[test]
    fn first_unanswered_in_catalog_order() {
        let set = sample();
        let mut answers = AnswerStore::for_questions(&set);
        assert_eq!(find_first_unanswered(&set, &answers), Some(0));

        answers.set(&set.questions()[0], "Yes".into()).unwrap();
        answers.set(&set.questions()[2], "details".into()).unwrap();
        assert_eq!(find_first_unanswered(&set, &answers), Some(1));

        answers
            .set(&set.questions()[1], Selection::from_iter(["Threats"]).into())
            .unwrap();
        assert_eq!(find_first_unanswered(&set, &answers), None);
    }
}
