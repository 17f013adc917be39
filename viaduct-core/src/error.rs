use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("missing reference: {0}")]
    Reference(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unknown query: {0}")]
    UnknownQuery(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    pub(crate) fn reference(target: impl Into<String>) -> Self {
        Self::Reference(target.into())
    }

    pub(crate) fn not_found(target: impl Into<String>) -> Self {
        Self::NotFound(target.into())
    }
}
