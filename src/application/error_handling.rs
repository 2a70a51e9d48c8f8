// src/application/error_handling.rs
//
// Error Handling for CLI commands
//
// ARCHITECTURE:
// - Maps internal errors → user-facing responses
// - Consistent format whether printed as text or JSON
// - Never exposes internal implementation details
// - Logs the full error for debugging

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AppError;

/// Standard error response for the command line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Series or volume does not exist
    NotFound,

    /// Invalid input
    Validation,

    /// Domain invariant violation
    DomainError,

    /// Database/persistence error
    Database,

    /// Catalog or network failure
    ExternalService,

    /// Config file missing or malformed
    Configuration,

    /// File system error
    FileSystem,

    /// Anything else
    Internal,
}

impl ErrorType {
    /// Process exit code used by the binary
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorType::NotFound => 3,
            ErrorType::Validation | ErrorType::DomainError => 2,
            ErrorType::Configuration => 78,
            _ => 1,
        }
    }
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found", None),

            AppError::Validation(message) => Self::new(ErrorType::Validation, message, None),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Http(http_error) => {
                log::warn!("HTTP error: {:?}", http_error);
                Self::new(
                    ErrorType::ExternalService,
                    "External service error",
                    Some(http_error.to_string()),
                )
            }

            AppError::Config(message) => Self::new(
                ErrorType::Configuration,
                "Invalid configuration",
                Some(message),
            ),

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{} ({})", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}
