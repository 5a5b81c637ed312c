/// Error type for catalogs that cannot back a survey.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Survey has no questions")]
    Empty,

    #[error("Duplicate question id: {0}")]
    DuplicateId(String),

    #[error("Duplicate question text: {0}")]
    DuplicateText(String),

    #[error("Question '{0}' offers no options")]
    NoOptions(String),

    #[error("Question '{question}' lists option '{option}' more than once")]
    DuplicateOption { question: String, option: String },
}
