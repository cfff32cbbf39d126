//! Error types for lens-core

use thiserror::Error;

/// Result type alias for lens-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by entities, repositories and collaborators
#[derive(Error, Debug)]
pub enum Error {
    /// Requested ticker or company is absent from the snapshot
    #[error("Company not found: {0}")]
    NotFound(String),

    /// A numeric field is NaN or infinite
    #[error("Invalid numeric field '{field}' in {entity}: {value}")]
    InvalidNumericField {
        entity: String,
        field: &'static str,
        value: f64,
    },

    /// Data-access collaborator failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// External data collection failed
    #[error("Collection failed for {ticker}: {reason}")]
    Collection { ticker: String, reason: String },

    /// External persona analysis failed
    #[error("Analysis failed for {ticker}: {reason}")]
    Analysis { ticker: String, reason: String },
}

impl Error {
    /// Shorthand for [`Error::InvalidNumericField`]
    pub fn invalid_numeric(entity: impl Into<String>, field: &'static str, value: f64) -> Self {
        Error::InvalidNumericField {
            entity: entity.into(),
            field,
            value,
        }
    }

    /// Whether this error means "no such company"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
