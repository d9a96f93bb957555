use anyhow::Result;
use clap::Args;

use sw_core::Config;
use sw_database_postgres::{establish_pool, init::init_db};
use sw_loaders::run_ingest_tick;

#[derive(Args, Debug)]
pub struct IngestCommand {
  /// Re-download source CSVs and repopulate even in debug mode
  #[arg(short, long)]
  force: bool,
}

pub async fn execute(cmd: IngestCommand, config: Config) -> Result<()> {
  let dirs = config.data_dirs();
  dirs.ensure_exists()?;

  let pool = establish_pool(&config.database_url()).await?;
  {
    let mut conn = pool.get().await?;
    init_db(&mut conn).await?;
  }

  let debug_mode = config.debug && !cmd.force;
  run_ingest_tick(&pool, &dirs, config.csv_source_base_url.clone(), debug_mode).await?;

  Ok(())
}
