//! Full service bootstrap: fetch data, prepare the database, start the
//! background tasks, serve HTTP.

use anyhow::Result;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, info};

use sw_api::janitor::spawn_report_janitor;
use sw_api::scheduler::spawn_ingest_scheduler;
use sw_api::{spawn_report_worker, AppState};
use sw_core::Config;
use sw_database_postgres::{establish_pool, init::init_db};
use sw_loaders::{clean_csv_files, ingest::populate_db, Downloader};

pub async fn execute(config: Config) -> Result<()> {
  info!("Starting storewatch");
  let dirs = config.data_dirs();
  dirs.ensure_exists()?;

  debug!("Getting csv files");
  // startup never re-downloads files that are already present
  let downloader = Downloader::new(dirs.csv_dir(), config.csv_source_base_url.clone(), true)?;
  downloader.download_all().await?;
  downloader.verify_all_exist()?;
  clean_csv_files(dirs.csv_dir())?;

  debug!("Connecting to database");
  let pool = establish_pool(&config.database_url()).await?;
  {
    let mut conn = pool.get().await?;
    init_db(&mut conn).await?;
    populate_db(&mut conn, &dirs.csv_dir(), config.debug).await?;
  }
  info!("Database initialized");

  let generating_total = Arc::new(AtomicBool::new(false));
  let jobs = spawn_report_worker(pool.clone(), dirs.clone(), generating_total.clone());
  spawn_report_janitor(pool.clone(), dirs.clone());
  spawn_ingest_scheduler(
    pool.clone(),
    dirs.clone(),
    config.csv_source_base_url.clone(),
    config.debug,
  );

  let state = AppState::new(pool, dirs, jobs, generating_total);
  info!("Starting Server...");
  sw_api::run_server(state, &config.bind_addr).await?;

  Ok(())
}
