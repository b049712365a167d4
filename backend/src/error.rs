//! Service error handling
//!
//! This module provides the unified error type returned by services,
//! with a stable machine-readable code for each variant.

use thiserror::Error;
use tracing::error;

/// Service error type
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    /// Map a repository error, keeping database failures distinct
    pub fn from_repository(err: anyhow::Error) -> Self {
        match err.downcast::<sqlx::Error>() {
            Ok(db_err) => ServiceError::Database(db_err),
            Err(other) => ServiceError::Internal(other),
        }
    }

    /// Stable code for logs and JSON output
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Internal(_) => "INTERNAL_ERROR",
            ServiceError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Message safe to show to an operator; internal details go to the log
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Validation(msg) | ServiceError::NotFound(msg) => msg.clone(),
            ServiceError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "An internal error occurred".to_string()
            }
            ServiceError::Database(err) => {
                error!("Database error: {:?}", err);
                "A database error occurred".to_string()
            }
        }
    }
}

/// Result type alias for services
pub type ServiceResult<T> = Result<T, ServiceError>;
