//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

use sea_orm::SqlErr;

#[derive(Debug)]
pub enum DomainError {
    /// Missing or malformed credentials
    Unauthenticated(String),
    /// Credentials valid for another scope, or unknown
    PermissionDenied(String),
    /// Resource absent or soft-deleted
    NotFound(String),
    /// Duplicate asset number or same-day survey
    Conflict(String),
    /// Unparsable input
    InvalidArgument(String),
    /// Database/persistence error
    Database(String),
}

impl DomainError {
    pub fn asset_not_found() -> Self {
        DomainError::NotFound("Asset not found".to_string())
    }

    /// Maps a store error raised by a write, turning unique-index violations into `Conflict`.
    pub fn from_write(e: sea_orm::DbErr, conflict: &str) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::debug!("Unique constraint violated: {}", detail);
                DomainError::Conflict(conflict.to_string())
            }
            _ => DomainError::from(e),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            DomainError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
