//! Core types for triage surveys.
//!
//! This crate provides the foundational types for defining a questionnaire:
//! - `QuestionSet` - The ordered, validated catalog of questions
//! - `Question` and `QuestionKind` - Individual questions and their answer types
//! - `AnswerValue`, `Selection` and `AnswerStore` - Collected answers
//! - `is_answered` and `find_first_unanswered` - Completeness checks

mod question;
pub use question::{ChoiceQuestion, FreeTextQuestion, NONE_OF_THESE, Question, QuestionKind};

mod question_set;
pub use question_set::QuestionSet;

mod selection;
pub use selection::Selection;

mod answer_value;
pub use answer_value::AnswerValue;

mod answers;
pub use answers::{AnswerError, AnswerStore};

mod validate;
pub use validate::{find_first_unanswered, is_answered};

mod error;
pub use error::CatalogError;
