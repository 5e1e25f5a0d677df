use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("Unknown exchange: {0}")]
    UnknownExchange(String),

    #[error("Unknown trade direction: {0}")]
    UnknownDirection(String),

    #[error("Unknown sizing mode: {0}")]
    UnknownSizingMode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalcError>;
