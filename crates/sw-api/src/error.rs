use actix_web::{HttpResponse, ResponseError};
use sw_database_postgres::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Report worker is not running")]
  WorkerUnavailable,
}

impl ResponseError for ApiError {
  fn error_response(&self) -> HttpResponse {
    // database or worker trouble is never the caller's fault
    HttpResponse::InternalServerError()
      .json(serde_json::json!({ "error": self.to_string() }))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_display_worker_unavailable() {
    let err = ApiError::WorkerUnavailable;
    assert_eq!(err.to_string(), "Report worker is not running");
  }

  #[test]
  fn test_error_maps_to_internal_server_error() {
    let err = ApiError::WorkerUnavailable;
    assert_eq!(err.error_response().status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
  }
}
