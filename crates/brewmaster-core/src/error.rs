//! Core error types for brewmaster-core.
//!
//! This module defines the error hierarchy using thiserror. Each storage or
//! encoding concern has its own enum; `CoreError` is the umbrella type
//! returned at the library surface.

use thiserror::Error;

/// Core error type for brewmaster-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Recipe/session storage errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Share-code encode/decode errors
    #[error("Share code error: {0}")]
    Share(#[from] ShareError),

    /// A step id that does not exist in the current step list
    #[error("Step {0} not found")]
    StepNotFound(u32),

    /// A substep id that does not exist within the given step
    #[error("Substep {substep_id} of step {step_id} not found")]
    SubstepNotFound { step_id: u32, substep_id: u32 },

    /// Starting a timer on a substep that has none
    #[error("Substep {substep_id} of step {step_id} has no timer")]
    NoTimer { step_id: u32, substep_id: u32 },
}

/// Storage-specific errors for the recipe and session stores.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read/write store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize store contents: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Recipe '{0}' not found")]
    NotFound(String),

    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Errors decoding a share code back into a recipe.
///
/// A failed import leaves all prior state untouched; the caller surfaces
/// the message to the user.
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("Share code is not valid percent-encoded text: {0}")]
    PercentDecode(#[from] std::string::FromUtf8Error),

    #[error("Share code is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Share code does not contain a valid recipe: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
