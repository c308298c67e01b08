use thiserror::Error;

#[derive(Debug, Error)]
pub enum BedrockError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("prompt template error: {0}")]
    Prompt(String),
}

impl From<tera::Error> for BedrockError {
    fn from(e: tera::Error) -> Self {
        BedrockError::Prompt(e.to_string())
    }
}
