use crate::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Invalid persistent client {name}: {source}")]
    InvalidClient {
        name: String,
        #[source]
        source: DomainError,
    },
}
