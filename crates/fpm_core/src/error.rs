use thiserror::Error;

/// Errors raised while assembling a match, before the first tick.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid match config: {0}")]
    InvalidConfig(String),

    #[error("Invalid formation '{name}': {reason}")]
    InvalidFormation { name: String, reason: String },

    #[error("{team} roster is empty")]
    EmptyRoster { team: String },
}

impl From<validator::ValidationErrors> for MatchError {
    fn from(err: validator::ValidationErrors) -> Self {
        MatchError::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
