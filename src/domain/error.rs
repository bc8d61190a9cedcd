use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Task error: {0}")]
    Task(String),
}

impl From<String> for DomainError {
    fn from(s: String) -> Self {
        DomainError::Database(s)
    }
}

impl From<&str> for DomainError {
    fn from(s: &str) -> Self {
        DomainError::InvalidInput(s.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Parse(e.to_string())
    }
}
