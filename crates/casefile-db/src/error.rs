use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(&'static str),

    #[error(transparent)]
    CoreError(#[from] casefile_core::error::CoreError),
}

pub type DbResult<T> = std::result::Result<T, DbError>;
