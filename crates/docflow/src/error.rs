use thiserror::Error;

/// Errors that can occur when interacting with the flow store.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for flow store operations.
pub type Result<T> = std::result::Result<T, FlowError>;
