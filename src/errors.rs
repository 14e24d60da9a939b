use mongodb::error::ErrorKind;
use thiserror::Error;

/// MongoDB "Unauthorized" server error code.
const MONGO_UNAUTHORIZED: i32 = 13;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Quiz '{0}' is no longer available")]
    StaleQuiz(String),

    #[error("Quiz '{0}' has already been taken")]
    AlreadyTaken(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Auth(_) => "AUTH_ERROR",
            AppError::Persistence(PersistenceError::PermissionDenied(_)) => "PERMISSION_DENIED",
            AppError::Persistence(PersistenceError::Unavailable(_)) => "UNAVAILABLE",
            AppError::Persistence(PersistenceError::Other(_)) => "DATABASE_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::StaleQuiz(_) => "STALE_QUIZ",
            AppError::AlreadyTaken(_) => "ALREADY_TAKEN",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidState(_) => "INVALID_STATE",
        }
    }

    /// Text for the blocking notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Persistence(PersistenceError::PermissionDenied(_)) => {
                "Permission denied. Please check your authentication.".to_string()
            }
            AppError::Persistence(PersistenceError::Unavailable(_)) => {
                "Database is unavailable. Please check your internet connection.".to_string()
            }
            AppError::StaleQuiz(_) => "This quiz is no longer available.".to_string(),
            AppError::AlreadyTaken(_) => {
                "You have already taken this quiz. You can only take each quiz once.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        AppError::Persistence(PersistenceError::Other(message.into()))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        let message = err.to_string();
        let classified = match err.kind.as_ref() {
            ErrorKind::Command(command) if command.code == MONGO_UNAUTHORIZED => {
                PersistenceError::PermissionDenied(message)
            }
            ErrorKind::Authentication { .. } => PersistenceError::PermissionDenied(message),
            ErrorKind::ServerSelection { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::Io(_) => PersistenceError::Unavailable(message),
            _ => PersistenceError::Other(message),
        };
        AppError::Persistence(classified)
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::other(format!("BSON serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::StaleQuiz("q".into()).error_code(), "STALE_QUIZ");
        assert_eq!(
            AppError::AlreadyTaken("q".into()).error_code(),
            "ALREADY_TAKEN"
        );
        assert_eq!(
            AppError::from(PersistenceError::Unavailable("down".into())).error_code(),
            "UNAVAILABLE"
        );
    }

    #[test]
    fn test_tailored_user_messages() {
        let denied = AppError::Persistence(PersistenceError::PermissionDenied("x".into()));
        assert_eq!(
            denied.user_message(),
            "Permission denied. Please check your authentication."
        );

        let unavailable = AppError::Persistence(PersistenceError::Unavailable("x".into()));
        assert_eq!(
            unavailable.user_message(),
            "Database is unavailable. Please check your internet connection."
        );

        let other = AppError::other("disk full");
        assert_eq!(other.user_message(), "disk full");
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::Validation("Please fill in all fields".into());
        assert_eq!(err.to_string(), "Validation error: Please fill in all fields");
    }
}
