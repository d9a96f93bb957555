/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
  #[error("HTTP error: {0}")]
  Http(String),

  #[error("CSV parsing error: {0}")]
  Csv(String),

  #[error("IO error: {0}")]
  Io(String),

  #[error("Database error: {0}")]
  Database(String),

  #[error("Missing source file: {0}")]
  MissingFile(String),

  #[error("Invalid data: {0}")]
  InvalidData(String),
}

// Implement conversions manually
impl From<csv::Error> for LoaderError {
  fn from(err: csv::Error) -> Self {
    LoaderError::Csv(err.to_string())
  }
}

impl From<std::io::Error> for LoaderError {
  fn from(err: std::io::Error) -> Self {
    LoaderError::Io(err.to_string())
  }
}

impl From<reqwest::Error> for LoaderError {
  fn from(err: reqwest::Error) -> Self {
    LoaderError::Http(err.to_string())
  }
}

impl From<diesel::result::Error> for LoaderError {
  fn from(err: diesel::result::Error) -> Self {
    LoaderError::Database(err.to_string())
  }
}

impl From<sw_database_postgres::RepositoryError> for LoaderError {
  fn from(err: sw_database_postgres::RepositoryError) -> Self {
    LoaderError::Database(err.to_string())
  }
}

pub type LoaderResult<T> = Result<T, LoaderError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_loader_error_display_http() {
    let err = LoaderError::Http("connection refused".to_string());
    assert_eq!(err.to_string(), "HTTP error: connection refused");
  }

  #[test]
  fn test_loader_error_display_csv() {
    let err = LoaderError::Csv("invalid header".to_string());
    assert_eq!(err.to_string(), "CSV parsing error: invalid header");
  }

  #[test]
  fn test_loader_error_display_missing_file() {
    let err = LoaderError::MissingFile("store_status.csv".to_string());
    assert_eq!(err.to_string(), "Missing source file: store_status.csv");
  }

  #[test]
  fn test_loader_error_display_invalid_data() {
    let err = LoaderError::InvalidData("bad timestamp".to_string());
    assert_eq!(err.to_string(), "Invalid data: bad timestamp");
  }
}
