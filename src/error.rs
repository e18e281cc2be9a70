//! Error types for validator construction, configuration and record decoding.
//!
//! A record that fails its rules is *not* an error: failures are reported as
//! values inside [`ValidationReport`](crate::functional::validation_engine::ValidationReport).
//! The variants below cover the cases where the caller handed us something we
//! cannot work with at all.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    /// A field carries a rule but the message set has no entry for it.
    #[error("field `{field}` has a validation rule but no error message")]
    MissingMessage { field: String },

    /// The same field key was registered twice in one validator.
    #[error("field `{field}` is registered more than once")]
    DuplicateField { field: String },

    #[error("invalid configuration value for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },

    #[error("failed to decode application record: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FormResult<T> = Result<T, FormError>;

impl FormError {
    pub fn invalid_config(key: &str, reason: impl Into<String>) -> Self {
        FormError::InvalidConfig {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
