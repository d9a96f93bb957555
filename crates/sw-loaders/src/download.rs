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

//! HTTP download of the three source CSVs.
//!
//! Handles client construction, retries with exponential backoff, and the
//! skip-existing behavior used in debug runs.

use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use sw_core::SOURCE_CSV_NAMES;

use crate::error::{LoaderError, LoaderResult};

/// Google Drive file ids of the published source CSVs, keyed by base name
const SOURCE_FILE_IDS: [(&str, &str); 3] = [
  ("store_status", "1UIx1hVJ7qt_6oQoGZgb8B3P2vd1FD025"),
  ("menu_hours", "1va1X3ydSh-0Rt1hsy2QSnHRA4w57PcXg"),
  ("time_zone_info", "101P9quxHoMZMZCVWQ5o-shonk2lgK1-o"),
];

const TIMEOUT_SECS: u64 = 60;
const MAX_RETRIES: u32 = 3;

/// Fetches the source CSVs into the csv directory
pub struct Downloader {
  client: reqwest::Client,
  csv_dir: PathBuf,
  base_url: Option<String>,
  skip_existing: bool,
}

impl Downloader {
  /// Create a downloader writing into `csv_dir`.
  ///
  /// `base_url` overrides the built-in source location; `skip_existing`
  /// (debug runs) leaves already-downloaded files untouched.
  pub fn new<P: AsRef<Path>>(
    csv_dir: P,
    base_url: Option<String>,
    skip_existing: bool,
  ) -> LoaderResult<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(TIMEOUT_SECS))
      .user_agent("sw-loaders/1.0")
      .build()?;

    Ok(Self { client, csv_dir: csv_dir.as_ref().to_path_buf(), base_url, skip_existing })
  }

  fn url_for(&self, name: &str) -> String {
    source_url(self.base_url.as_deref(), name)
  }

  async fn download_file(&self, name: &str) -> LoaderResult<()> {
    let file_path = self.csv_dir.join(format!("{name}.csv"));
    if self.skip_existing && file_path.exists() {
      debug!("{name}.csv already exists");
      return Ok(());
    }

    let url = self.url_for(name);
    let mut last_error = None;

    for attempt in 1..=MAX_RETRIES {
      match self.fetch(&url).await {
        Ok(body) => {
          tokio::fs::write(&file_path, body).await?;
          info!("Downloaded {name}.csv");
          return Ok(());
        }
        Err(e) => {
          warn!("Download attempt {attempt} failed for {name}.csv: {e}");
          last_error = Some(e);

          if attempt < MAX_RETRIES {
            // Exponential backoff
            let delay = Duration::from_millis(1000 * (2_u64.pow(attempt - 1)));
            tokio::time::sleep(delay).await;
          }
        }
      }
    }

    Err(last_error.unwrap_or_else(|| LoaderError::Http("download failed".to_string())))
  }

  async fn fetch(&self, url: &str) -> LoaderResult<String> {
    let response = self.client.get(url).send().await?;
    if !response.status().is_success() {
      return Err(LoaderError::Http(format!("{url} returned {}", response.status())));
    }
    Ok(response.text().await?)
  }

  /// Download every source CSV concurrently; the first failure wins
  pub async fn download_all(&self) -> LoaderResult<()> {
    let results = join_all(SOURCE_CSV_NAMES.iter().map(|name| self.download_file(name))).await;
    results.into_iter().collect()
  }

  /// Verify that every expected source CSV exists on disk
  pub fn verify_all_exist(&self) -> LoaderResult<()> {
    verify_sources_exist(&self.csv_dir)
  }
}

/// Resolved download URL for one source file
fn source_url(base_url: Option<&str>, name: &str) -> String {
  match base_url {
    Some(base) => format!("{}/{}.csv", base.trim_end_matches('/'), name),
    None => {
      let file_id =
        SOURCE_FILE_IDS.iter().find(|(n, _)| *n == name).map(|(_, id)| *id).unwrap_or_default();
      format!("https://drive.google.com/uc?export=download&id={file_id}&confirm=1")
    }
  }
}

/// Check that every expected source CSV exists under `csv_dir`
pub fn verify_sources_exist(csv_dir: &Path) -> LoaderResult<()> {
  for name in SOURCE_CSV_NAMES {
    let file_path = csv_dir.join(format!("{name}.csv"));
    if !file_path.exists() {
      return Err(LoaderError::MissingFile(format!("{name}.csv")));
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn source_url_prefers_base_url_override() {
    assert_eq!(
      source_url(Some("https://cdn.example.com/feeds/"), "menu_hours"),
      "https://cdn.example.com/feeds/menu_hours.csv"
    );
  }

  #[test]
  fn source_url_defaults_to_drive_link() {
    let url = source_url(None, "store_status");
    assert!(url.starts_with("https://drive.google.com/uc?export=download&id="));
    assert!(url.contains("1UIx1hVJ7qt_6oQoGZgb8B3P2vd1FD025"));
  }

  #[test]
  fn verify_reports_first_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("store_status.csv"), "store_id,status,timestamp_utc\n")
      .unwrap();
    let err = verify_sources_exist(dir.path()).unwrap_err();
    assert!(matches!(err, LoaderError::MissingFile(f) if f == "menu_hours.csv"));
  }
}
