//! Background report worker: a single task draining an in-process job
//! queue, so at most one report generates at a time and HTTP handlers
//! never block on report work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::error;

use sw_core::DataDirs;
use sw_database_postgres::DbPool;
use sw_report::{generate_for_all, generate_total_report};
use uuid::Uuid;

/// Jobs accepted by the report worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportJob {
  /// Fleet report for one registered report id
  Fleet(Uuid),
  /// Full-history dashboard feed rebuild
  Total,
}

/// Spawn the worker task and hand back its job queue.
///
/// A failed fleet job leaves its cache row `generating = true`; the
/// janitor reclaims it once it goes stale. The total-report flag is
/// always cleared, success or not.
pub fn spawn_report_worker(
  pool: DbPool,
  dirs: DataDirs,
  generating_total: Arc<AtomicBool>,
) -> UnboundedSender<ReportJob> {
  let (tx, mut rx) = mpsc::unbounded_channel();

  tokio::spawn(async move {
    while let Some(job) = rx.recv().await {
      match job {
        ReportJob::Fleet(report_id) => {
          if let Err(e) = generate_for_all(&pool, &dirs, report_id).await {
            error!("report {report_id} generation failed: {e}");
          }
        }
        ReportJob::Total => {
          if let Err(e) = generate_total_report(&pool, &dirs).await {
            error!("total report generation failed: {e}");
          }
          generating_total.store(false, Ordering::SeqCst);
        }
      }
    }
  });

  tx
}
