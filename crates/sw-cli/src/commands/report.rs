//! Diagnostic command: build one store's report without going through the
//! HTTP lifecycle.

use anyhow::{anyhow, Result};
use clap::Args;

use sw_core::Config;
use sw_database_postgres::establish_pool;
use sw_database_postgres::models::StoreStatus;
use sw_report::build_store_report;

#[derive(Args, Debug)]
pub struct ReportCommand {
  /// Store to report on
  #[arg(long)]
  store_id: i64,
}

pub async fn execute(cmd: ReportCommand, config: Config) -> Result<()> {
  let pool = establish_pool(&config.database_url()).await?;
  let mut conn = pool.get().await?;

  let anchor = StoreStatus::max_timestamp(&mut conn)
    .await?
    .ok_or_else(|| anyhow!("store_status is empty, run ingest first"))?;

  let report = build_store_report(&mut conn, cmd.store_id, anchor).await?;
  println!("{}", serde_json::to_string_pretty(&report)?);

  Ok(())
}
