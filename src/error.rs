//! Error types for ttdecode
//!
//! Every anomaly in a frame is a hard failure of the whole decode call.

use thiserror::Error;

/// Result type alias using DecodeError
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Unified error type for decode operations
#[derive(Debug, Error)]
pub enum DecodeError {
    // -------------------------------------------------------------------------
    // Frame Errors
    // -------------------------------------------------------------------------
    /// A recognised module with too few fields, an unknown Black Button
    /// selector, or a field that could not be read at its position.
    #[error("Bad payload: {fields:?}")]
    BadPayload { fields: Vec<String> },

    /// The module code is not one the decoder knows. Carries the raw segment.
    #[error("Unsupported module: {0:?}")]
    UnsupportedModule(String),

    // -------------------------------------------------------------------------
    // Collaborator Errors
    // -------------------------------------------------------------------------
    #[error("Humidity calibration failed: {0}")]
    Calibration(String),

    #[error("Request id generation failed: {0}")]
    IdGeneration(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Concurrency Errors
    // -------------------------------------------------------------------------
    #[error("Worker panicked: {0}")]
    WorkerPanicked(String),

    // -------------------------------------------------------------------------
    // CLI Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DecodeError {
    /// Build a `BadPayload` from a borrowed field list
    pub fn bad_payload<S: AsRef<str>>(fields: &[S]) -> Self {
        DecodeError::BadPayload {
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
        }
    }

    /// True for the two frame-level kinds (`BadPayload`, `UnsupportedModule`)
    pub fn is_frame_error(&self) -> bool {
        matches!(
            self,
            DecodeError::BadPayload { .. } | DecodeError::UnsupportedModule(_)
        )
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Serialization(e.to_string())
    }
}
