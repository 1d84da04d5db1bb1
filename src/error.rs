use crate::domain::TaskId;

/// A rejected create/edit submission. Checks run in a fixed order and the
/// first failure wins, so at most one of these is ever reported per accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title can not be empty!")]
    EmptyTitle,

    #[error("Description can not be empty!")]
    EmptyDescription,

    /// Deadline earlier than one hour before the validation snapshot.
    #[error("Incorrect deadline!")]
    InvalidDeadline,
}

/// Library-level error type for duely operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("No task with id {0}")]
    NotFound(TaskId),

    #[error("Task {0} is currently being edited")]
    EditInProgress(TaskId),

    #[error("No create or edit session in progress")]
    NoSession,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for duely operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::EmptyTitle.to_string(),
            "Title can not be empty!"
        );
        assert_eq!(
            ValidationError::EmptyDescription.to_string(),
            "Description can not be empty!"
        );
        assert_eq!(
            ValidationError::InvalidDeadline.to_string(),
            "Incorrect deadline!"
        );
    }

    #[test]
    fn test_validation_wraps_into_error() {
        let err: Error = ValidationError::EmptyTitle.into();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyTitle)
        ));
    }
}
