#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Vacation has already ended")]
    AlreadyEnded,

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationFailed(errors.to_string())
    }
}

impl AppError {
    /// Stable machine-readable code for callers that map errors onto their
    /// own transport.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationFailed(_) => "validation_failed",
            AppError::AlreadyEnded => "already_ended",
            AppError::InvalidDateRange(_) => "invalid_date_range",
            AppError::NotFound(_) => "not_found",
            AppError::Internal(_) => "internal",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
