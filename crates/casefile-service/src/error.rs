use thiserror::Error;

use casefile_core::types::FieldErrors;

/// Service layer errors - the typed domain failure taxonomy
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] casefile_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] casefile_core::error::CoreError),

    #[error("There were validation errors.")]
    Validation { details: FieldErrors },

    #[error("Invalid reference code provided.")]
    InvalidReference { details: FieldErrors },

    #[error("A client with this email address already exists.")]
    DuplicateEmail { details: FieldErrors },

    #[error("Client not found.")]
    NotFound { details: FieldErrors },

    #[error("Server configuration error: {0}")]
    Configuration(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
