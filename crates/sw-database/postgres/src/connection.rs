use crate::error::{RepositoryError, RepositoryResult};
use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use std::time::Duration;

pub type DbPool = Pool<AsyncPgConnection>;

const MAX_POOL_SIZE: u32 = 16;
/// Connection timeout in seconds - pool will fail instead of retrying forever
const CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Establish a BB8 connection pool against the configured database
pub async fn establish_pool(database_url: &str) -> RepositoryResult<DbPool> {
  let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

  Pool::builder()
    .max_size(MAX_POOL_SIZE)
    .connection_timeout(Duration::from_secs(CONNECTION_TIMEOUT_SECS))
    .build(manager)
    .await
    .map_err(|e| RepositoryError::Pool(format!("Failed to connect to database: {}", e)))
}
