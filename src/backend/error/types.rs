/**
 * Backend Error Types
 *
 * Error taxonomy for the competition backend:
 *
 * - Not-found errors (room, user, question) surface to the immediate caller
 *   as client errors and never affect other participants.
 * - Persistence failures roll back the failing transaction and surface as
 *   server errors; broadcasts already sent are never compensated.
 * - Round precondition failures (`owner_not_in_room`, `owner_leave`) are
 *   NOT represented here: all participants need to see them, so they are
 *   broadcast as `error` events instead of returned to one caller.
 * - Delivery failures are swallowed inside the connection registry and
 *   never reach this type.
 */
use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced to the caller of a competition operation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// No room with the given id.
    #[error("room {0} not found")]
    RoomNotFound(i32),

    /// No user with the given telegram id.
    #[error("user {0} not found")]
    UserNotFound(i64),

    /// The word pool has no question for the requested language pair.
    #[error("no question available for language pair {from} -> {to}")]
    QuestionUnavailable { from: i32, to: i32 },

    /// The referenced question word does not exist.
    #[error("word {0} not found")]
    WordNotFound(uuid::Uuid),

    /// A data store read or commit failed; the transaction was rolled back.
    #[error("persistence failure: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Serializing an event or response failed.
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BackendError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::RoomNotFound(_) | Self::UserNotFound(_) | Self::WordNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::QuestionUnavailable { .. } => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Shorthand for backend operation results.
pub type BackendResult<T> = Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status_codes() {
        assert_eq!(BackendError::RoomNotFound(3).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BackendError::UserNotFound(42).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            BackendError::QuestionUnavailable { from: 2, to: 1 }.status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_persistence_is_server_error() {
        let error = BackendError::Persistence(sqlx::Error::RowNotFound);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_messages_name_the_subject() {
        assert_eq!(BackendError::RoomNotFound(3).to_string(), "room 3 not found");
        assert_eq!(BackendError::UserNotFound(42).to_string(), "user 42 not found");
    }
}
