use anyhow::Result;
use tracing::info;

use sw_core::Config;
use sw_database_postgres::{establish_pool, init::init_db};

pub async fn execute(config: Config) -> Result<()> {
  let pool = establish_pool(&config.database_url()).await?;
  let mut conn = pool.get().await?;
  init_db(&mut conn).await?;
  info!("Database schema initialized");
  Ok(())
}
