/// Error taxonomy for kanban operations
///
/// Every service operation returns [`KanbanResult`]. The variants map onto the
/// failure classes callers can act on:
///
/// - `InvalidArgument`: a required field is missing, blank, or out of range
/// - `NotFound`: the entity does not exist *or* belongs to another user
/// - `Conflict`: a uniqueness rule was violated (e.g. a taken username)
/// - `Storage`: the database failed; the transaction has been rolled back
///
/// `NotFound` deliberately does not say which of the two cases happened, so a
/// caller cannot probe for other users' ids.

use crate::sequencer::SequenceError;

/// Result alias for kanban operations
pub type KanbanResult<T> = Result<T, KanbanError>;

/// Error type for kanban operations
#[derive(Debug, thiserror::Error)]
pub enum KanbanError {
    /// Missing, blank or out-of-range input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Entity absent or not owned by the acting user
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Uniqueness violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error
    #[error("Storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl KanbanError {
    /// Returns true when the error carries internal detail that must not be shown to callers
    pub fn is_internal(&self) -> bool {
        matches!(self, KanbanError::Storage(_))
    }
}

impl From<SequenceError> for KanbanError {
    fn from(err: SequenceError) -> Self {
        match err {
            SequenceError::UnknownMember(_) => KanbanError::NotFound("Column"),
            other => KanbanError::InvalidArgument(other.to_string()),
        }
    }
}

/// Trims `value` and rejects it when nothing is left
///
/// # Errors
///
/// Returns `InvalidArgument` naming `field` if the value is empty or whitespace.
pub fn require_non_blank(field: &str, value: &str) -> KanbanResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(KanbanError::InvalidArgument(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}
