//! Error types for report generation

use thiserror::Error;

/// Errors raised while computing analytics or rendering artifacts
#[derive(Debug, Error)]
pub enum ReportError {
    /// Entity validation, lookup or collaborator failure
    #[error(transparent)]
    Core(#[from] lens_core::Error),

    /// Prompt template failure
    #[error("Prompt error: {0}")]
    Prompt(#[from] lens_prompt::PromptError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot JSON could not be decoded
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Artifact type outside overview/narratives/chart
    #[error("Unknown artifact type: {0}")]
    UnknownKind(String),

    /// Analysis step outside the fixed workflow
    #[error("Unknown analysis step: {0}")]
    UnknownStep(String),

    /// Operation needs a collaborator the service was built without
    #[error("No {0} configured")]
    MissingCollaborator(&'static str),
}

impl ReportError {
    /// Whether the underlying cause is an unknown company
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReportError::Core(e) if e.is_not_found())
    }
}

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let err = ReportError::from(lens_core::Error::NotFound("999999".to_string()));
        assert_eq!(err.to_string(), "Company not found: 999999");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ReportError::UnknownKind("pdf".to_string()).to_string(),
            "Unknown artifact type: pdf"
        );
        assert_eq!(
            ReportError::MissingCollaborator("collector").to_string(),
            "No collector configured"
        );
        assert!(!ReportError::Config("x".to_string()).is_not_found());
    }
}
