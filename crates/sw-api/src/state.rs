use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use sw_core::DataDirs;
use sw_database_postgres::DbPool;

use crate::worker::ReportJob;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
  pub pool: DbPool,
  pub dirs: DataDirs,
  pub jobs: UnboundedSender<ReportJob>,
  /// Guards the total-report rebuild; reset by the worker on completion.
  /// Process-local on purpose: a crash clears it with the process.
  pub generating_total: Arc<AtomicBool>,
}

impl AppState {
  /// `generating_total` must be the same flag handed to the worker, or
  /// total-report rebuilds will never be observed as finished.
  pub fn new(
    pool: DbPool,
    dirs: DataDirs,
    jobs: UnboundedSender<ReportJob>,
    generating_total: Arc<AtomicBool>,
  ) -> Self {
    Self { pool, dirs, jobs, generating_total }
  }
}
