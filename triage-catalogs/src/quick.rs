//! Three-question quick check, submitted as a plain transcript.

use triage_wizard::{CatalogError, NONE_OF_THESE, PayloadStyle, Question, QuestionSet};

pub fn questions() -> Result<QuestionSet, CatalogError> {
    QuestionSet::new(vec![
        Question::single_select(
            "ongoing",
            "Is the behaviour still going on?",
            ["Yes", "No"],
        ),
        Question::multi_select(
            "who",
            "Who is involved?",
            ["A manager", "A co-worker", "A client or customer", NONE_OF_THESE],
        ),
        Question::free_text("summary", "In one or two sentences, what happened?"),
    ])
}

/// One `Qn: answer` line per question.
pub fn payload_style() -> PayloadStyle {
    PayloadStyle::Transcript
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_valid() {
        let set = questions().unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.position("summary"), Some(2));
        assert_eq!(payload_style(), PayloadStyle::Transcript);
    }
}
