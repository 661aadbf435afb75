use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvaluatorError>;

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("invalid schema regex '{schema}' in check '{check}': {source}")]
    InvalidSchema {
        check: String,
        schema: String,
        #[source]
        source: regex::Error,
    },
}
