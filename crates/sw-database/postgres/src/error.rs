//! Repository error type shared by all database operations.

use diesel::result::Error as DieselError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
  #[error("Connection pool error: {0}")]
  Pool(String),

  #[error("Database query error: {0}")]
  Query(String),

  #[error("Insert error: {0}")]
  Insert(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Constraint violation: {0}")]
  ConstraintViolation(String),

  #[error("Transaction error: {0}")]
  Transaction(String),
}

impl From<DieselError> for RepositoryError {
  fn from(err: DieselError) -> Self {
    match err {
      DieselError::NotFound => RepositoryError::NotFound("Record not found".to_string()),
      DieselError::DatabaseError(kind, info) => match kind {
        diesel::result::DatabaseErrorKind::UniqueViolation => {
          RepositoryError::ConstraintViolation(info.message().to_string())
        }
        diesel::result::DatabaseErrorKind::ForeignKeyViolation => {
          RepositoryError::ConstraintViolation(info.message().to_string())
        }
        _ => RepositoryError::Query(info.message().to_string()),
      },
      _ => RepositoryError::Query(err.to_string()),
    }
  }
}

impl From<diesel_async::pooled_connection::bb8::RunError> for RepositoryError {
  fn from(err: diesel_async::pooled_connection::bb8::RunError) -> Self {
    RepositoryError::Pool(err.to_string())
  }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_display_pool() {
    let err = RepositoryError::Pool("timed out".to_string());
    assert_eq!(err.to_string(), "Connection pool error: timed out");
  }

  #[test]
  fn test_error_display_not_found() {
    let err = RepositoryError::NotFound("report".to_string());
    assert_eq!(err.to_string(), "Not found: report");
  }

  #[test]
  fn test_from_diesel_not_found() {
    let err: RepositoryError = DieselError::NotFound.into();
    assert!(matches!(err, RepositoryError::NotFound(_)));
  }
}
