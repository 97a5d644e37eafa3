use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Backend/store failure (network, permission, engine error).
    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    StoreError,
    InvalidInput,
    NotFound,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::StoreError => "STORE_ERROR",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl AppError {
    /// Stable code for the UI layer; presentation itself lives there.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Store(_) => ErrorCode::StoreError,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::NotFound => ErrorCode::NotFound,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
