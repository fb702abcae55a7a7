use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type PredictResult<T> = Result<T, PredictError>;
