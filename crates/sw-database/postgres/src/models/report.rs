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

//! Report cache rows: one row per fleet report, matching the on-disk
//! artifact `report_cache/{uuid}.csv`. At most one row may be in flight
//! (`generating = true`); the partial unique index created in
//! [`crate::init`] enforces that under concurrency.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RepositoryError, RepositoryResult};
use crate::schema::report_cache;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = report_cache)]
#[diesel(primary_key(uuid))]
pub struct ReportCache {
  pub uuid: Uuid,
  pub generating: bool,
  pub start_timestamp_utc: DateTime<Utc>,
  pub end_timestamp_utc: Option<DateTime<Utc>>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = report_cache)]
struct NewReportCache {
  uuid: Uuid,
  generating: bool,
  start_timestamp_utc: DateTime<Utc>,
}

/// Outcome of a single-flight admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
  /// No report was in flight; a new row was inserted under this id.
  Started(Uuid),
  /// Another report was already in flight; its id is returned instead.
  Coalesced(Uuid),
}

impl Admission {
  pub fn report_id(&self) -> Uuid {
    match self {
      Admission::Started(id) | Admission::Coalesced(id) => *id,
    }
  }
}

impl ReportCache {
  pub async fn find(
    conn: &mut diesel_async::AsyncPgConnection,
    report_id: Uuid,
  ) -> RepositoryResult<Option<ReportCache>> {
    use crate::schema::report_cache::dsl::*;

    Ok(report_cache.find(report_id).first(conn).await.optional()?)
  }

  /// The currently generating row, if any
  pub async fn in_flight(
    conn: &mut diesel_async::AsyncPgConnection,
  ) -> RepositoryResult<Option<ReportCache>> {
    use crate::schema::report_cache::dsl::*;

    Ok(report_cache.filter(generating.eq(true)).first(conn).await.optional()?)
  }

  /// Single-flight admission: either registers `candidate` as the new
  /// in-flight report or returns the id of the one already running.
  ///
  /// Two concurrent callers both reaching the insert race on the partial
  /// unique index; the loser re-reads the winner's row.
  pub async fn admit(
    conn: &mut diesel_async::AsyncPgConnection,
    candidate: Uuid,
  ) -> RepositoryResult<Admission> {
    if let Some(running) = Self::in_flight(conn).await? {
      return Ok(Admission::Coalesced(running.uuid));
    }

    let row = NewReportCache {
      uuid: candidate,
      generating: true,
      start_timestamp_utc: Utc::now(),
    };

    match diesel::insert_into(report_cache::table).values(&row).execute(conn).await {
      Ok(_) => Ok(Admission::Started(candidate)),
      Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
        let running = Self::in_flight(conn).await?.ok_or_else(|| {
          RepositoryError::Transaction("in-flight report vanished during admission".to_string())
        })?;
        Ok(Admission::Coalesced(running.uuid))
      }
      Err(e) => Err(e.into()),
    }
  }

  /// Mark a report as complete
  pub async fn finalize(
    conn: &mut diesel_async::AsyncPgConnection,
    report_id: Uuid,
    finished_at: DateTime<Utc>,
  ) -> RepositoryResult<usize> {
    use crate::schema::report_cache::dsl::*;

    Ok(
      diesel::update(report_cache.find(report_id))
        .set((generating.eq(false), end_timestamp_utc.eq(Some(finished_at))))
        .execute(conn)
        .await?,
    )
  }

  /// Drop a cache row whose artifact no longer exists on disk
  pub async fn delete(
    conn: &mut diesel_async::AsyncPgConnection,
    report_id: Uuid,
  ) -> RepositoryResult<usize> {
    use crate::schema::report_cache::dsl::*;

    Ok(diesel::delete(report_cache.find(report_id)).execute(conn).await?)
  }

  /// Reclaim in-flight rows older than `cutoff` (worker crashed or was
  /// shut down mid-generation). Returns the ids removed so the caller can
  /// clean up temp files.
  pub async fn delete_stale_in_flight(
    conn: &mut diesel_async::AsyncPgConnection,
    cutoff: DateTime<Utc>,
  ) -> RepositoryResult<Vec<Uuid>> {
    use crate::schema::report_cache::dsl::*;

    Ok(
      diesel::delete(
        report_cache.filter(generating.eq(true)).filter(start_timestamp_utc.lt(cutoff)),
      )
      .returning(uuid)
      .load(conn)
      .await?,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_admission_report_id() {
    let id = Uuid::new_v4();
    assert_eq!(Admission::Started(id).report_id(), id);
    assert_eq!(Admission::Coalesced(id).report_id(), id);
  }
}
