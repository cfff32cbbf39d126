//! Prompt template errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PromptError>;

#[derive(Error, Debug)]
pub enum PromptError {
    /// No variant for the requested language
    #[error("Template '{template}' has no {language} variant")]
    MissingVariant { template: String, language: String },

    #[error("Template '{template}' ({language}) does not parse: {detail}")]
    Parse {
        template: String,
        language: String,
        detail: String,
    },

    #[error("Template '{template}' failed to render: {detail}")]
    Render { template: String, detail: String },

    /// Template built or found without any variant
    #[error("Template '{0}' has no variants")]
    Empty(String),

    #[error("No template named '{0}'")]
    Unknown(String),
}
