use thiserror::Error;

/// Errors raised at the engine boundary.
///
/// Scoring itself never fails: a grounding problem is a verdict, not an
/// error. These variants cover caller data that violates the input contract
/// and configuration that cannot be used.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("invalid input at {location}: {reason}")]
    InvalidInput { location: String, reason: String },

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl GuardError {
    pub fn invalid_input(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GuardError>;
