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

//! Fleet report job: one CSV artifact per report id, one row per store.

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

use sw_core::DataDirs;
use sw_database_postgres::models::{ReportCache, StoreStatus};
use sw_database_postgres::{DbPool, RepositoryError};

use crate::builder::build_store_report;
use crate::error::{ReportError, ReportResult};

/// Scratch path the artifact is written to before the atomic rename
pub fn temp_report_file(dirs: &DataDirs, report_id: Uuid) -> PathBuf {
  dirs.report_cache_dir().join(format!("{report_id}.csv.tmp"))
}

/// Generate the fleet report artifact for `report_id` and finalize its
/// cache row.
///
/// Retrying with an id whose artifact already exists is a no-op. The CSV
/// is written to a temp path and renamed into place, so a reader probing
/// for the artifact can never observe a truncated file.
pub async fn generate_for_all(
  pool: &DbPool,
  dirs: &DataDirs,
  report_id: Uuid,
) -> ReportResult<()> {
  let report_file = dirs.report_file(&report_id.to_string());
  if report_file.exists() {
    return Ok(());
  }

  let mut conn = pool.get().await.map_err(RepositoryError::from)?;

  let anchor =
    StoreStatus::max_timestamp(&mut conn).await?.ok_or(ReportError::NoObservations)?;
  let stores = StoreStatus::all_store_ids(&mut conn).await?;
  info!("Generating report for {} stores, for report {report_id}", stores.len());

  let tmp_file = temp_report_file(dirs, report_id);
  let mut writer = csv::Writer::from_path(&tmp_file)?;

  let progress = ProgressBar::new(stores.len() as u64).with_style(
    ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")
      .expect("static progress template"),
  );
  progress.set_message("stores");

  for store_id in stores {
    let report = build_store_report(&mut conn, store_id, anchor).await?;
    writer.serialize(&report)?;
    progress.inc(1);
  }
  progress.finish_and_clear();

  writer.flush()?;
  drop(writer);
  fs::rename(&tmp_file, &report_file)?;

  ReportCache::finalize(&mut conn, report_id, Utc::now()).await?;
  info!("Finished generating report {report_id}");

  Ok(())
}
