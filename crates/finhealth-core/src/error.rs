use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinHealthError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinHealthError {
    fn from(e: serde_json::Error) -> Self {
        FinHealthError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for FinHealthError {
    fn from(e: serde_yaml::Error) -> Self {
        FinHealthError::SerializationError(e.to_string())
    }
}
