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

//! Bulk load of the `*_clean.csv` files, gated by the `csv_data_changed`
//! setting. Columns are consumed positionally, matching the table layouts;
//! all inserts use `ON CONFLICT DO NOTHING` so re-ingest is idempotent.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use csv::StringRecord;
use diesel_async::AsyncPgConnection;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use sw_core::{DataDirs, CSV_DATA_CHANGED, SOURCE_CSV_NAMES};
use sw_database_postgres::models::{
  MenuHours, NewMenuHours, NewStoreStatus, NewStoreTimeZone, Setting, StoreStatus, StoreTimeZone,
};
use sw_database_postgres::{DbPool, RepositoryError};

use crate::clean::clean_csv_files;
use crate::download::Downloader;
use crate::error::{LoaderError, LoaderResult};

fn field<'a>(record: &'a StringRecord, idx: usize) -> LoaderResult<&'a str> {
  record
    .get(idx)
    .map(str::trim)
    .ok_or_else(|| LoaderError::InvalidData(format!("missing column {idx}: {record:?}")))
}

fn parse_store_id(value: &str) -> LoaderResult<i64> {
  value.parse().map_err(|_| LoaderError::InvalidData(format!("bad store_id {value:?}")))
}

/// Normalized status flag as written by the clean step
fn parse_status(value: &str) -> LoaderResult<bool> {
  match value {
    "1" => Ok(true),
    "0" => Ok(false),
    other => Err(LoaderError::InvalidData(format!("bad status {other:?}"))),
  }
}

/// Timestamps arrive as `2023-01-24 09:06:42.605777 UTC`, with the
/// fractional part optional
fn parse_utc_timestamp(value: &str) -> LoaderResult<DateTime<Utc>> {
  let trimmed = value.trim_end_matches(" UTC");
  NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
    .map(|naive| naive.and_utc())
    .map_err(|_| LoaderError::InvalidData(format!("bad timestamp {value:?}")))
}

fn parse_local_time(value: &str) -> LoaderResult<NaiveTime> {
  NaiveTime::parse_from_str(value, "%H:%M:%S")
    .map_err(|_| LoaderError::InvalidData(format!("bad time of day {value:?}")))
}

fn parse_day_of_week(value: &str) -> LoaderResult<i16> {
  let dow: i16 =
    value.parse().map_err(|_| LoaderError::InvalidData(format!("bad day_of_week {value:?}")))?;
  if !(0..=6).contains(&dow) {
    return Err(LoaderError::InvalidData(format!("day_of_week {dow} out of range")));
  }
  Ok(dow)
}

async fn populate_store_status(
  conn: &mut AsyncPgConnection,
  file: &Path,
  debug_mode: bool,
) -> LoaderResult<usize> {
  if debug_mode && !StoreStatus::is_empty(conn).await? {
    debug!("Skipping populating of store_status table");
    return Ok(0);
  }

  info!("Populating store_status table");
  let mut reader = csv::Reader::from_path(file)?;
  let mut records = Vec::new();
  for result in reader.records() {
    let record = result?;
    records.push(NewStoreStatus {
      store_id: parse_store_id(field(&record, 0)?)?,
      status: parse_status(field(&record, 1)?)?,
      timestamp_utc: parse_utc_timestamp(field(&record, 2)?)?,
    });
  }

  let inserted = NewStoreStatus::bulk_insert(conn, records).await?;
  debug!("Populated store_status table ({inserted} new rows)");
  Ok(inserted)
}

async fn populate_time_zone(
  conn: &mut AsyncPgConnection,
  file: &Path,
  debug_mode: bool,
) -> LoaderResult<usize> {
  if debug_mode && !StoreTimeZone::is_empty(conn).await? {
    debug!("Skipping populating of time_zone table");
    return Ok(0);
  }

  info!("Populating time_zone table");
  let mut reader = csv::Reader::from_path(file)?;
  let mut records = Vec::new();
  for result in reader.records() {
    let record = result?;
    records.push(NewStoreTimeZone {
      store_id: parse_store_id(field(&record, 0)?)?,
      timezone_str: field(&record, 1)?.to_string(),
    });
  }

  let inserted = NewStoreTimeZone::bulk_insert(conn, records).await?;
  debug!("Populated time_zone table ({inserted} new rows)");
  Ok(inserted)
}

async fn populate_menu_hours(
  conn: &mut AsyncPgConnection,
  file: &Path,
  debug_mode: bool,
) -> LoaderResult<usize> {
  if debug_mode && !MenuHours::is_empty(conn).await? {
    debug!("Skipping populating of menu_hours table");
    return Ok(0);
  }

  info!("Populating menu_hours table");
  let mut reader = csv::Reader::from_path(file)?;
  let mut records = Vec::new();
  for result in reader.records() {
    let record = result?;
    records.push(NewMenuHours {
      store_id: parse_store_id(field(&record, 0)?)?,
      day_of_week: parse_day_of_week(field(&record, 1)?)?,
      start_time_local: parse_local_time(field(&record, 2)?)?,
      end_time_local: parse_local_time(field(&record, 3)?)?,
    });
  }

  let inserted = NewMenuHours::bulk_insert(conn, records).await?;
  debug!("Populated menu_hours table ({inserted} new rows)");
  Ok(inserted)
}

/// Load all three clean CSVs if `csv_data_changed` says there is fresh
/// data, then reset the flag
pub async fn populate_db(
  conn: &mut AsyncPgConnection,
  csv_dir: &Path,
  debug_mode: bool,
) -> LoaderResult<()> {
  Setting::seed(conn, CSV_DATA_CHANGED, "true").await?;

  let changed = Setting::get(conn, CSV_DATA_CHANGED).await?;
  if changed.as_deref() != Some("true") {
    debug!("csv_data_changed is not set, skipping populate");
    return Ok(());
  }

  info!("Populating data tables");
  populate_store_status(conn, &csv_dir.join("store_status_clean.csv"), debug_mode).await?;
  populate_time_zone(conn, &csv_dir.join("time_zone_info_clean.csv"), debug_mode).await?;
  populate_menu_hours(conn, &csv_dir.join("menu_hours_clean.csv"), debug_mode).await?;

  Setting::set(conn, CSV_DATA_CHANGED, "false").await?;
  info!("Populated data tables");
  Ok(())
}

/// One full ingest pass: download, verify, normalize, flag, populate.
/// This is both the hourly tick body and the `ingest` CLI command.
pub async fn run_ingest_tick(
  pool: &DbPool,
  dirs: &DataDirs,
  base_url: Option<String>,
  debug_mode: bool,
) -> LoaderResult<()> {
  let csv_dir = dirs.csv_dir();
  let downloader = Downloader::new(&csv_dir, base_url, debug_mode)?;
  downloader.download_all().await?;
  downloader.verify_all_exist()?;

  // sources may have been re-downloaded; drop stale clean files so the
  // normalize step regenerates them
  if !debug_mode {
    for name in SOURCE_CSV_NAMES {
      let clean = csv_dir.join(format!("{name}_clean.csv"));
      if clean.exists() {
        fs::remove_file(&clean)?;
      }
    }
  }
  clean_csv_files(&csv_dir)?;

  let mut conn = pool.get().await.map_err(RepositoryError::from)?;
  Setting::set(&mut conn, CSV_DATA_CHANGED, "true").await?;
  populate_db(&mut conn, &csv_dir, debug_mode).await?;

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Timelike;

  #[test]
  fn parses_timestamp_with_fraction() {
    let ts = parse_utc_timestamp("2023-01-24 09:06:42.605777 UTC").unwrap();
    assert_eq!(ts.to_rfc3339(), "2023-01-24T09:06:42.605777+00:00");
  }

  #[test]
  fn parses_timestamp_without_fraction() {
    let ts = parse_utc_timestamp("2023-01-24 09:06:42 UTC").unwrap();
    assert_eq!(ts.second(), 42);
  }

  #[test]
  fn rejects_garbage_timestamp() {
    assert!(parse_utc_timestamp("yesterday").is_err());
  }

  #[test]
  fn parses_normalized_status() {
    assert!(parse_status("1").unwrap());
    assert!(!parse_status("0").unwrap());
    assert!(parse_status("active").is_err());
  }

  #[test]
  fn parses_local_time() {
    let t = parse_local_time("09:30:00").unwrap();
    assert_eq!(t, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
  }

  #[test]
  fn rejects_out_of_range_day_of_week() {
    assert_eq!(parse_day_of_week("6").unwrap(), 6);
    assert!(parse_day_of_week("7").is_err());
  }
}
