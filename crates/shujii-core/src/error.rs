use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("expected {expected} yes/no answers, got {actual}")]
    WrongAnswerCount { expected: usize, actual: usize },

    #[error("missing answer for question {0}")]
    MissingAnswer(String),

    #[error("unknown question id: {0}")]
    UnknownQuestion(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
