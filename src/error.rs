//! Error types for college-connect
//!
//! Failures fall into three groups: local validation that blocks a request,
//! network or non-2xx responses, and payloads that are missing expected keys.
//! None of them are retried.

use thiserror::Error;

/// A client-side validation failure. The request is never sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Please enter a valid decimal number for CTC.")]
    InvalidCtc,

    #[error("Please enter a search term.")]
    EmptySearchTerm,

    #[error("Enter at least one search term.")]
    NoSearchCriteria,

    #[error("Please enter a college name.")]
    MissingCollegeName,

    #[error("Please select a CSV file.")]
    NoFileSelected,

    #[error("Please upload a valid CSV file.")]
    InvalidFileType,

    #[error("Please select a record first.")]
    NoRecordSelected,

    #[error("Nothing to update: no field was changed.")]
    Unchanged,
}

/// The main error type for college-connect operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected locally before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or a generic description.
        message: String,
    },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response was received but lacks keys the page relies on.
    #[error("Incomplete data received from server.")]
    IncompletePayload {
        /// The first missing key.
        missing: String,
    },

    /// A row referenced by id is not loaded on the page.
    #[error("item not found for given id: {0}")]
    RecordNotFound(i64),

    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for college-connect operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Build the error for a non-2xx response.
    ///
    /// Falls back to the generic wording when the body carried no message.
    #[must_use]
    pub fn status(status: u16, message: Option<String>) -> Self {
        Self::Status {
            status,
            message: message
                .unwrap_or_else(|| format!("Network response was not ok (status: {status})")),
        }
    }

    /// Whether the failure happened before any request was sent.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
