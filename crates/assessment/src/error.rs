use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssessmentError>;

#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error("Invalid answers JSON: {0}")]
    InvalidAnswers(#[from] serde_json::Error),

    #[error("Answer set has {actual} entries, catalog has {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}
