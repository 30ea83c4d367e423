use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FireError {
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
    #[error("invalid expense '{id}': {reason}")]
    InvalidExpense { id: String, reason: String },
}
