use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Promo code has expired")]
    PromoExpired,

    #[error("Promo code has reached its maximum uses")]
    PromoExhausted,

    #[error("Persistence error")]
    PersistenceError(#[from] StoreError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::PromoExpired | AppError::PromoExhausted => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::PromoExpired => "PROMO_EXPIRED",
            AppError::PromoExhausted => "PROMO_EXHAUSTED",
            AppError::PersistenceError(_) => "PERSISTENCE_ERROR",
        }
    }

    /// The message shown to clients. Store failures never leak their cause.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::PromoExpired | AppError::PromoExhausted => self.to_string(),
            AppError::PersistenceError(_) => "A database error occurred".to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::PersistenceError(e) => {
                error!(error = ?e, code = self.code(), "Persistence error");
            }
            _ => {
                warn!(code = self.code(), message = %self, "Request rejected");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal details
        self.log();

        error_response(self.public_message(), status)
    }
}
