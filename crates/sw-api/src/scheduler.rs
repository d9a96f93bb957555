//! Hourly ingest trigger: refresh the source CSVs and repopulate the
//! tables when they changed.

use std::time::Duration;
use tracing::error;

use sw_core::DataDirs;
use sw_database_postgres::DbPool;
use sw_loaders::run_ingest_tick;

const INGEST_INTERVAL_SECS: u64 = 3600;

/// Spawn the hourly ingest task. A failed tick is logged and retried on
/// the next interval; nothing else depends on it.
pub fn spawn_ingest_scheduler(
  pool: DbPool,
  dirs: DataDirs,
  base_url: Option<String>,
  debug_mode: bool,
) {
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(Duration::from_secs(INGEST_INTERVAL_SECS));
    // the first tick fires immediately; bootstrap already ingested
    interval.tick().await;

    loop {
      interval.tick().await;
      if let Err(e) = run_ingest_tick(&pool, &dirs, base_url.clone(), debug_mode).await {
        error!("ingest tick failed: {e}");
      }
    }
  });
}
