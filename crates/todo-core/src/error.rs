use thiserror::Error;

/// Application-wide error types for the todo service.
#[derive(Error, Debug)]
pub enum AppError {
    /// An item with the given id already exists.
    #[error("Item {0} already exists")]
    Conflict(i64),

    /// No item with the given id.
    #[error("Item {0} not found")]
    NotFound(i64),

    /// Credentials were rejected by the identity provider.
    #[error("Invalid username or password")]
    Unauthorized,

    /// A bearer token could not be issued or failed verification.
    #[error("Token error: {0}")]
    TokenError(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Returns true if the error was caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Conflict(_)
                | AppError::NotFound(_)
                | AppError::Unauthorized
                | AppError::TokenError(_)
        )
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::TokenError(err.to_string())
    }
}
