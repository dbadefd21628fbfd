#[derive(Debug, thiserror::Error)]
pub enum RecipientError {
    #[error("{0}")]
    Validation(String),
    #[error("Number {0} is already in the list")]
    Duplicate(String),
    #[error("Number {0} is not in the list")]
    NotFound(String),
}
