//! Six-question triage of a workplace bullying or harassment situation.

use triage_wizard::{
    CatalogError, FreeTextQuestion, NONE_OF_THESE, PayloadStyle, Question, QuestionKind,
    QuestionSet,
};

/// Sentence the answers are submitted behind.
pub const INSTRUCTION: &str = "Please assess whether the workplace situation described \
     by these questionnaire answers likely qualifies as bullying or harassment, \
     and suggest next steps:";

const YES_NO: [&str; 2] = ["Yes", "No"];

pub fn questions() -> Result<QuestionSet, CatalogError> {
    let set = QuestionSet::new(vec![
        Question::single_select(
            "repeated",
            "Has the behaviour happened more than once?",
            YES_NO,
        ),
        Question::single_select(
            "serious",
            "Was there a single incident serious enough to cause harm on its own?",
            YES_NO,
        ),
        Question::single_select(
            "intimidated",
            "Did the behaviour leave you feeling humiliated or intimidated?",
            YES_NO,
        ),
        Question::single_select(
            "management",
            "Was it part of normal management action, such as feedback or scheduling?",
            YES_NO,
        ),
        Question::multi_select(
            "conduct",
            "Which of these describe the conduct?",
            [
                "Verbal aggression or insults",
                "Threats or intimidation",
                "Spreading rumours",
                "Exclusion or isolation",
                "Unwanted sexual comments or contact",
                NONE_OF_THESE,
            ],
        ),
        Question::new(
            "details",
            "Describe what happened in your own words.",
            QuestionKind::FreeText(FreeTextQuestion::with_placeholder(
                "Who was involved, when and where it happened, what was said or done",
            )),
        ),
    ])?;
    Ok(set
        .with_prelude(
            "Answer six short questions about what happened at work. \
             Your answers are sent to the triage assistant for an assessment.",
        )
        .with_epilogue("The assessment is general information, not legal advice."))
}

/// Answers go out as a JSON dump behind [`INSTRUCTION`].
pub fn payload_style() -> PayloadStyle {
    PayloadStyle::Structured {
        instruction: INSTRUCTION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_valid() {
        let set = questions().unwrap();
        assert_eq!(set.len(), 6);
        assert!(set.questions()[..4].iter().all(|q| q.options() == YES_NO));
        assert!(set.questions()[4].kind().is_multi_select());
        assert!(set.questions()[4].options().contains(&NONE_OF_THESE.to_string()));
        assert!(!set.questions()[5].kind().is_choice());
    }
}
