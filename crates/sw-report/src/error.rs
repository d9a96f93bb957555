use sw_database_postgres::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Database error: {0}")]
  Database(#[from] diesel::result::Error),

  #[error("CSV error: {0}")]
  Csv(String),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("No observations in store_status, nothing to report on")]
  NoObservations,
}

impl From<csv::Error> for ReportError {
  fn from(err: csv::Error) -> Self {
    ReportError::Csv(err.to_string())
  }
}

pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_display_no_observations() {
    let err = ReportError::NoObservations;
    assert_eq!(err.to_string(), "No observations in store_status, nothing to report on");
  }

  #[test]
  fn test_error_display_csv() {
    let err = ReportError::Csv("bad row".to_string());
    assert_eq!(err.to_string(), "CSV error: bad row");
  }
}
