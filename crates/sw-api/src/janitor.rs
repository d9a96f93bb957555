//! Janitor for crashed report generations.
//!
//! A worker that dies mid-report leaves its cache row `generating = true`
//! forever, which would block every future trigger. The janitor deletes
//! in-flight rows past the TTL along with their temp files.

use chrono::{Duration, Utc};
use std::fs;
use std::time::Duration as StdDuration;
use tracing::{error, warn};

use sw_core::DataDirs;
use sw_database_postgres::models::ReportCache;
use sw_database_postgres::{DbPool, RepositoryError, RepositoryResult};
use sw_report::temp_report_file;

const SWEEP_INTERVAL_SECS: u64 = 300;
const STALE_TTL_MINUTES: i64 = 30;

async fn sweep(pool: &DbPool, dirs: &DataDirs) -> RepositoryResult<()> {
  let mut conn = pool.get().await.map_err(RepositoryError::from)?;

  let cutoff = Utc::now() - Duration::minutes(STALE_TTL_MINUTES);
  let reclaimed = ReportCache::delete_stale_in_flight(&mut conn, cutoff).await?;

  for report_id in reclaimed {
    warn!("reclaimed stale in-flight report {report_id}");
    let tmp_file = temp_report_file(dirs, report_id);
    if tmp_file.exists() {
      if let Err(e) = fs::remove_file(&tmp_file) {
        warn!("could not remove temp file for {report_id}: {e}");
      }
    }
  }

  Ok(())
}

/// Spawn the periodic stale-report sweep
pub fn spawn_report_janitor(pool: DbPool, dirs: DataDirs) {
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(StdDuration::from_secs(SWEEP_INTERVAL_SECS));
    loop {
      interval.tick().await;
      if let Err(e) = sweep(&pool, &dirs).await {
        error!("janitor sweep failed: {e}");
      }
    }
  });
}
