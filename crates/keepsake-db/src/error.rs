use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Tagged store errors. The API layer maps these onto HTTP status codes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    InvalidSlug(String),

    #[error("{0}")]
    InvalidSecret(String),

    #[error("slug is already taken")]
    SlugTaken,

    #[error("failed to generate a unique slug")]
    SlugGeneration,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database lock poisoned")]
    Poisoned,
}
