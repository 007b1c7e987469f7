use axum::http::StatusCode;
use thiserror::Error;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Encryption(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::NotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            _ => HttpError::server_error(error.to_string()),
        }
    }
}

impl From<crate::error::ErrorMessage> for ServiceError {
    fn from(err: crate::error::ErrorMessage) -> Self {
        ServiceError::Encryption(err.to_string())
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,

            ServiceError::Encryption(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
