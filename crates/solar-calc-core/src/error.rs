use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolarCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Share link could not be decoded: {0}")]
    ShareDecode(String),

    #[error("Store error for key '{key}': {reason}")]
    Store { key: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SolarCalcError {
    fn from(e: serde_json::Error) -> Self {
        SolarCalcError::SerializationError(e.to_string())
    }
}
