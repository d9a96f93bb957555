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

//! # sw-core
//!
//! Core configuration, error handling, and shared constants for the
//! storewatch service.
//!
//! This crate provides the foundational pieces shared across all storewatch
//! crates:
//!
//! - [`Config`] - database and service configuration loaded from the environment
//! - [`DataDirs`] - resolved on-disk layout for CSV inputs and report artifacts
//! - [`Error`] and [`Result`] - unified error handling
//!
//! ## Example
//!
//! ```ignore
//! use sw_core::Config;
//!
//! let config = Config::from_env()?;
//! let pool_url = config.database_url();
//! ```

pub mod config;
pub mod error;
pub use config::{Config, DataDirs};
pub use error::{Error, Result};

/// Timezone assumed for a store with no `time_zone` row.
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

/// Settings key flipped by the ingest trigger when fresh CSVs have landed.
pub const CSV_DATA_CHANGED: &str = "csv_data_changed";

/// Base names of the three source CSV files, without the `.csv` suffix.
pub const SOURCE_CSV_NAMES: [&str; 3] = ["store_status", "menu_hours", "time_zone_info"];

/// File name of the full-history dashboard feed artifact.
pub const TOTAL_REPORT_FILE: &str = "total_report.csv";

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_timezone() {
    assert_eq!(DEFAULT_TIMEZONE, "America/Chicago");
  }

  #[test]
  fn test_source_csv_names() {
    assert_eq!(SOURCE_CSV_NAMES.len(), 3);
    assert!(SOURCE_CSV_NAMES.contains(&"store_status"));
  }
}
