use serde::Serialize;
use thiserror::Error;

/// A single rejected field of a request body
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Validation failure without field details (malformed body)
    pub fn invalid(message: &str) -> Self {
        Error::Validation {
            message: message.to_string(),
            fields: Vec::new(),
        }
    }
}

