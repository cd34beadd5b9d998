//! Transient notices shown after a page action

use crate::error::{Error, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
    Error,
}

/// Terminal counterpart of a toast: a level, a short title and a description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: "Success".to_string(),
            description: description.into(),
        }
    }

    pub fn warning(description: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            title: "Warning".to_string(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }

    /// Map a failed action to a notice: validation problems warn, the rest error.
    /// An unparseable CTC is reported as an error.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Validation(ValidationError::InvalidCtc) => Self::error(err.to_string()),
            Error::Validation(v) => Self::warning(v.to_string()),
            other => Self::error(other.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == Level::Success
    }
}
