use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Rule list not found: {0}")]
    RuleListNotFound(String),

    #[error("Fetch window of {requested} entries exceeds the limit of {max}")]
    FetchWindowTooLarge { requested: usize, max: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Feed rendering failed: {0}")]
    Render(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
