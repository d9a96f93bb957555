//! Full-history report feeding the dashboard: seconds of uptime/downtime
//! per store over `[min_observation, max_observation]`.

use std::fs;
use tracing::info;

use serde::Serialize;
use sw_core::{DataDirs, TOTAL_REPORT_FILE};
use sw_database_postgres::models::StoreStatus;
use sw_database_postgres::{DbPool, RepositoryError};

use crate::builder::load_store_inputs;
use crate::error::{ReportError, ReportResult};
use crate::interpolate::{accumulate, Window};

#[derive(Debug, Serialize)]
struct TotalReportRow {
  store_id: i64,
  uptime: f64,
  downtime: f64,
}

/// Rebuild `report_cache/total_report.csv` from the entire observation
/// history. Unlike the fleet report this has no cache row; the caller is
/// responsible for not running two rebuilds at once.
pub async fn generate_total_report(pool: &DbPool, dirs: &DataDirs) -> ReportResult<()> {
  let mut conn = pool.get().await.map_err(RepositoryError::from)?;

  let min = StoreStatus::min_timestamp(&mut conn).await?.ok_or(ReportError::NoObservations)?;
  let max = StoreStatus::max_timestamp(&mut conn).await?.ok_or(ReportError::NoObservations)?;
  let window = Window::new(min, max);

  let stores = StoreStatus::all_store_ids(&mut conn).await?;
  info!("Generating total report for {} stores", stores.len());

  let report_file = dirs.report_cache_dir().join(TOTAL_REPORT_FILE);
  let tmp_file = report_file.with_extension("csv.tmp");
  let mut writer = csv::Writer::from_path(&tmp_file)?;

  for store_id in stores {
    let (hours, log) = load_store_inputs(&mut conn, store_id).await?;
    let (uptime, downtime) = accumulate(&log, &hours, window);
    writer.serialize(&TotalReportRow {
      store_id,
      uptime: uptime.num_seconds() as f64,
      downtime: downtime.num_seconds() as f64,
    })?;
  }

  writer.flush()?;
  drop(writer);
  fs::rename(&tmp_file, &report_file)?;

  info!("Finished generating total report");
  Ok(())
}
