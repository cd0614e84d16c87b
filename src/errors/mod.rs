//! Error handling module for the PoetryWorld data layer.
//!
//! Nothing here is fatal: every failure degrades to a recoverable state that
//! a screen can render (empty feed, missing poem, generic failure message).

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Single-row fetch missed
    NotFound(String),
    /// Content store failure (the network/backend-unreachable class)
    Database(String),
    /// Completion transport failure
    Transport(String),
    /// Structured AI response did not match the expected shape
    Parse(String),
    /// Rejected input
    Validation(String),
}

impl AppError {
    /// Get the error message.
    pub fn message(&self) -> &str {
        match self {
            AppError::NotFound(msg) => msg,
            AppError::Database(msg) => msg,
            AppError::Transport(msg) => msg,
            AppError::Parse(msg) => msg,
            AppError::Validation(msg) => msg,
        }
    }

    /// True for a malformed structured response, as opposed to a transport
    /// failure. Callers message the user differently for the two.
    pub fn is_parse(&self) -> bool {
        matches!(self, AppError::Parse(_))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Transport(_) => "TRANSPORT_ERROR",
            AppError::Parse(_) => "PARSE_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
        };
        write!(f, "{}: {}", code, self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}
