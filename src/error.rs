//! Error types for the join engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, JoinError>;

#[derive(Error, Debug)]
pub enum JoinError {
    /// Malformed table/join shape, bad reference or missing field.
    ///
    /// The message names the offending argument, field or index.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A post-processor returned an error while processing `alias`.
    #[error("Post-processor failed for join '{alias}': {source}")]
    PostProcessor {
        alias: String,
        #[source]
        source: anyhow::Error,
    },
}

impl JoinError {
    /// Shorthand used by validators
    pub fn invalid(msg: impl Into<String>) -> Self {
        JoinError::InvalidConfig(msg.into())
    }

    /// Message without the variant prefix
    pub fn message(&self) -> String {
        match self {
            JoinError::InvalidConfig(msg) => msg.clone(),
            JoinError::PostProcessor { source, .. } => source.to_string(),
        }
    }
}
