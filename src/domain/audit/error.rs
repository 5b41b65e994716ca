use crate::error::AppError;

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum AuditStoreError {
    #[error("audit store unavailable: {0}")]
    Unavailable(String),
    #[error("audit constraint violation: {0}")]
    ConstraintViolation(String),
}

/// An audit-log write that did not happen. Never fails the caller's request.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("operation not logged: {0}")]
pub struct LogFailure(#[from] pub AuditStoreError);

impl From<sqlx::Error> for AuditStoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation()
                || db_err.is_foreign_key_violation()
                || db_err.is_check_violation()
            {
                return AuditStoreError::ConstraintViolation(db_err.message().to_string());
            }
        }
        AuditStoreError::Unavailable(err.to_string())
    }
}

impl From<AuditStoreError> for AppError {
    fn from(err: AuditStoreError) -> Self {
        match err {
            AuditStoreError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            AuditStoreError::ConstraintViolation(msg) => AppError::Conflict(msg),
        }
    }
}
