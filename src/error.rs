//! Error types for the Q-learning crate

use thiserror::Error;

/// Main error type for the Q-learning crate
///
/// The policy engine itself never fails: unknown keys read as 0.0, an empty
/// legal-action set yields no action, and a missing adversary is replaced by
/// the origin. Errors only surface at the configuration, environment and
/// observer seams.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid agent argument '{argument}': {reason}")]
    ParseAgentArgument { argument: String, reason: String },

    #[error("invalid direction '{input}'. Expected one of: North, South, East, West, Stop")]
    ParseDirection { input: String },

    #[error("episode {episode} exceeded the step limit of {limit} decisions")]
    StepLimitExceeded { episode: usize, limit: usize },

    /// Returned by [`Environment`](crate::ports::Environment) implementations
    /// when the game engine cannot produce a frame.
    #[error("environment failed: {message}")]
    EnvironmentFailure { message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
