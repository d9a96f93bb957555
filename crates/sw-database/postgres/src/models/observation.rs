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

//! Status observation model for the `store_status` hypertable.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};

use crate::schema::store_status;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = store_status)]
#[diesel(primary_key(store_id, timestamp_utc))]
pub struct StoreStatus {
  pub store_id: i64,
  pub status: bool,
  pub timestamp_utc: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = store_status)]
pub struct NewStoreStatus {
  pub store_id: i64,
  pub status: bool,
  pub timestamp_utc: DateTime<Utc>,
}

impl NewStoreStatus {
  /// Batch insert; duplicate (store_id, timestamp_utc) pairs are dropped so
  /// re-ingest of the same CSV is a no-op.
  pub async fn bulk_insert(
    conn: &mut diesel_async::AsyncPgConnection,
    records: Vec<Self>,
  ) -> Result<usize, diesel::result::Error> {
    use diesel::insert_into;

    const BATCH_SIZE: usize = 1000;
    let mut total_inserted = 0;

    for chunk in records.chunks(BATCH_SIZE) {
      let inserted = insert_into(store_status::table)
        .values(chunk)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;
      total_inserted += inserted;
    }

    Ok(total_inserted)
  }
}

impl StoreStatus {
  /// Distinct ids of every store that has at least one observation
  pub async fn all_store_ids(
    conn: &mut diesel_async::AsyncPgConnection,
  ) -> Result<Vec<i64>, diesel::result::Error> {
    use crate::schema::store_status::dsl::*;

    store_status.select(store_id).distinct().load(conn).await
  }

  /// Full observation log for one store, ascending by timestamp
  pub async fn log_for_store(
    conn: &mut diesel_async::AsyncPgConnection,
    store: i64,
  ) -> Result<Vec<StoreStatus>, diesel::result::Error> {
    use crate::schema::store_status::dsl::*;

    store_status.filter(store_id.eq(store)).order(timestamp_utc.asc()).load(conn).await
  }

  /// Newest observation instant across the fleet; the report anchor
  pub async fn max_timestamp(
    conn: &mut diesel_async::AsyncPgConnection,
  ) -> Result<Option<DateTime<Utc>>, diesel::result::Error> {
    use crate::schema::store_status::dsl::*;
    use diesel::dsl::max;

    store_status.select(max(timestamp_utc)).first(conn).await
  }

  /// Oldest observation instant; lower bound of the total report window
  pub async fn min_timestamp(
    conn: &mut diesel_async::AsyncPgConnection,
  ) -> Result<Option<DateTime<Utc>>, diesel::result::Error> {
    use crate::schema::store_status::dsl::*;
    use diesel::dsl::min;

    store_status.select(min(timestamp_utc)).first(conn).await
  }

  pub async fn is_empty(
    conn: &mut diesel_async::AsyncPgConnection,
  ) -> Result<bool, diesel::result::Error> {
    use crate::schema::store_status::dsl::*;

    let probe: Vec<i64> = store_status.select(store_id).limit(1).load(conn).await?;
    Ok(probe.is_empty())
  }
}
