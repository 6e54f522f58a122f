use salvo::{Depot, Request, Response, async_trait, http::StatusCode, writing::Json};
use serde::Serialize;
use thiserror::Error;

use casefile_core::types::FieldErrors;
use casefile_service::error::ServiceError;

use crate::middleware::request_id;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] casefile_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] casefile_core::error::CoreError),

    #[error("Malformed request body: {0}")]
    ParseBody(String),

    #[error("Malformed query string: {0}")]
    ParseQuery(String),

    #[error("Invalid client ID format: {0}")]
    BadClientId(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// The uniform error envelope every failure renders as.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<FieldErrors>,
    request_id: String,
}

fn single_detail(field: &str, message: String) -> FieldErrors {
    let mut details = FieldErrors::new();
    details.insert(field.to_owned(), message);
    details
}

impl AppError {
    /// Translates the typed failure into envelope parts. Unexpected
    /// failures collapse to a generic message; internals never leak.
    fn envelope_parts(self) -> (StatusCode, &'static str, String, Option<FieldErrors>) {
        match self {
            Self::ServiceError(err) => match err {
                ServiceError::Validation { details } => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "There were validation errors.".to_owned(),
                    Some(details),
                ),
                ServiceError::InvalidReference { details } => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_REFERENCE",
                    "Invalid reference code provided.".to_owned(),
                    Some(details),
                ),
                ServiceError::DuplicateEmail { details } => (
                    StatusCode::CONFLICT,
                    "DUPLICATE_EMAIL",
                    "A client with this email address already exists.".to_owned(),
                    Some(details),
                ),
                ServiceError::NotFound { details } => (
                    StatusCode::NOT_FOUND,
                    "CLIENT_NOT_FOUND",
                    "Client not found.".to_owned(),
                    Some(details),
                ),
                ServiceError::Configuration(message) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SERVER_CONFIG_ERROR",
                    format!("Server configuration error: {message}."),
                    None,
                ),
                ServiceError::DatabaseError(_) | ServiceError::CoreError(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "An unexpected error occurred.".to_owned(),
                    None,
                ),
            },
            Self::ParseBody(message) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "There were validation errors.".to_owned(),
                Some(single_detail("body", message)),
            ),
            Self::ParseQuery(message) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "There were validation errors.".to_owned(),
                Some(single_detail("query", message)),
            ),
            Self::BadClientId(raw) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "There were validation errors.".to_owned(),
                Some(single_detail(
                    "client_id",
                    format!("Invalid client ID format: {raw}"),
                )),
            ),
            Self::DatabaseError(_) | Self::CoreError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "An unexpected error occurred.".to_owned(),
                None,
            ),
        }
    }
}

#[async_trait]
impl salvo::Writer for AppError {
    async fn write(self, _req: &mut Request, depot: &mut Depot, res: &mut Response) {
        let request_id = request_id::from_depot(depot);

        let source = format!("{:?}", &self);
        let (status, code, message, details) = self.envelope_parts();

        if status.is_server_error() {
            tracing::error!(%request_id, code, error = %source, "Request failed");
        } else {
            tracing::debug!(%request_id, code, %message, "Request rejected");
        }

        res.status_code(status);
        res.render(Json(ErrorEnvelope {
            error: ErrorBody {
                code,
                message,
                details,
                request_id,
            },
        }));
    }
}
