//! Error types shared across the wizard, the API clients and the CLI.

use thiserror::Error;

/// A single failed validation rule. The `Display` text is what the wizard
/// shows inline under the navigation footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Agent name is required")]
    NameRequired,

    #[error("Description is required")]
    DescriptionRequired,

    #[error("At least one client integration is required")]
    ClientRequired,

    #[error("Personality description is required")]
    PersonalityRequired,
}

/// Errors from the agent-creation and suggestion endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("empty response from {0}")]
    Empty(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
