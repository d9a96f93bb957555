/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Runtime schema bootstrap.
//!
//! The service creates its own tables on startup rather than shipping
//! migration files; every statement is re-run safe (`IF NOT EXISTS`).

use crate::error::RepositoryResult;
use crate::models::Setting;
use diesel::sql_query;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::{debug, warn};

async fn init_store_status_table(conn: &mut AsyncPgConnection) -> RepositoryResult<()> {
  sql_query(
    r#"
    CREATE TABLE IF NOT EXISTS store_status (
        store_id BIGINT not null,
        status BOOLEAN not null,
        timestamp_utc timestamptz not null,
        PRIMARY KEY (store_id, timestamp_utc)
    );
    "#,
  )
  .execute(conn)
  .await?;

  // store_status is the only table with real volume; everything below is
  // degraded-but-working on plain Postgres if the extension is missing.
  if let Err(e) = sql_query(
    r#"
    SELECT create_hypertable (
        'store_status',
        'timestamp_utc',
        if_not_exists => TRUE
    );
    "#,
  )
  .execute(conn)
  .await
  {
    warn!("create_hypertable failed, is the timescaledb extension installed? {e}");
  }

  sql_query(
    r#"
    CREATE INDEX IF NOT EXISTS ix_store_id_timestamp_utc
    ON store_status (store_id, timestamp_utc);
    "#,
  )
  .execute(conn)
  .await?;

  debug!("Created store_status table");
  Ok(())
}

async fn init_time_zone_table(conn: &mut AsyncPgConnection) -> RepositoryResult<()> {
  sql_query(
    r#"
    CREATE TABLE IF NOT EXISTS time_zone (
        store_id BIGINT PRIMARY KEY not null,
        timezone_str VARCHAR(255) DEFAULT 'America/Chicago' not null
    );
    "#,
  )
  .execute(conn)
  .await?;

  debug!("Created time_zone table");
  Ok(())
}

async fn init_menu_hours_table(conn: &mut AsyncPgConnection) -> RepositoryResult<()> {
  sql_query(
    r#"
    CREATE TABLE IF NOT EXISTS menu_hours (
        store_id BIGINT not null,
        day_of_week SMALLINT not null,
        start_time_local TIME not null,
        end_time_local TIME not null,
        PRIMARY KEY (store_id, day_of_week)
    );
    "#,
  )
  .execute(conn)
  .await?;

  debug!("Created menu_hours table");
  Ok(())
}

async fn init_report_cache_table(conn: &mut AsyncPgConnection) -> RepositoryResult<()> {
  sql_query(
    r#"
    CREATE TABLE IF NOT EXISTS report_cache (
        uuid UUID PRIMARY KEY not null,
        generating BOOLEAN not null DEFAULT true,
        start_timestamp_utc timestamptz not null,
        end_timestamp_utc timestamptz default null
    );
    "#,
  )
  .execute(conn)
  .await?;

  // at most one in-flight report; concurrent triggers race on this index
  sql_query(
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS ix_report_cache_in_flight
    ON report_cache (generating) WHERE generating;
    "#,
  )
  .execute(conn)
  .await?;

  debug!("Created report_cache table");
  Ok(())
}

async fn init_settings_table(conn: &mut AsyncPgConnection) -> RepositoryResult<()> {
  sql_query(
    r#"
    CREATE TABLE IF NOT EXISTS settings (
        setting_name VARCHAR(255) PRIMARY KEY not null,
        setting_value VARCHAR(255) not null
    );
    "#,
  )
  .execute(conn)
  .await?;

  debug!("Created settings table");
  Ok(())
}

/// Create all tables and seed the ingest flag
pub async fn init_db(conn: &mut AsyncPgConnection) -> RepositoryResult<()> {
  init_store_status_table(conn).await?;
  init_time_zone_table(conn).await?;
  init_menu_hours_table(conn).await?;
  init_report_cache_table(conn).await?;
  init_settings_table(conn).await?;

  Setting::seed(conn, sw_core::CSV_DATA_CHANGED, "true").await?;

  Ok(())
}
