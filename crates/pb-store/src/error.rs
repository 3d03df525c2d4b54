use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("board not found: {0}")]
    NotFound(String),
    #[error("invalid board name: {0:?}")]
    InvalidName(String),
    #[error("not signed in")]
    Unauthenticated,
    #[error("another request is still running")]
    Busy,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
    #[error("password must be at least {0} characters")]
    WeakPassword(usize),
    #[error("an account already exists for {0}")]
    AccountExists(String),
    #[error("wrong email or password")]
    InvalidCredentials,
    #[error("auth backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
