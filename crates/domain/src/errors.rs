use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Identifier {id} is already used by client {owner}")]
    DuplicateId { id: String, owner: String },

    #[error("Client already exists: {0}")]
    AlreadyExists(String),

    #[error("Client not found: {0}")]
    NotFound(String),

    #[error("Conflicting client data: {0}")]
    Conflict(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Unknown blocked service: {0}")]
    UnknownService(String),

    #[error("Duplicate blocked service: {0}")]
    DuplicateService(String),

    #[error("Invalid client identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid client: {0}")]
    InvalidClient(String),

    #[error("Unsupported client tag: {0}")]
    InvalidTag(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
