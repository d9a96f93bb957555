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

//! Per-store report assembly: one log fetch, three rolling windows.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use diesel_async::AsyncPgConnection;
use serde::Serialize;
use tracing::warn;

use sw_database_postgres::models::{MenuHours, StoreStatus, StoreTimeZone};

use crate::error::ReportResult;
use crate::interpolate::{self, StatusLogRow, WeeklyHours};

/// One CSV row of the fleet report. Field order is the artifact column
/// order; hour figures are minutes, day/week figures are hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreReport {
  pub store_id: i64,
  pub uptime_last_hour: i64,
  pub uptime_last_day: i64,
  pub uptime_last_week: i64,
  pub downtime_last_hour: i64,
  pub downtime_last_day: i64,
  pub downtime_last_week: i64,
}

/// Fetch one store's hours, timezone, and full observation log, with every
/// observation projected into the store's local time.
pub async fn load_store_inputs(
  conn: &mut AsyncPgConnection,
  store_id: i64,
) -> ReportResult<(WeeklyHours, Vec<StatusLogRow>)> {
  let hours_rows = MenuHours::for_store(conn, store_id).await?;
  let hours = WeeklyHours::from_rows(
    hours_rows.into_iter().map(|r| (r.day_of_week as u8, r.start_time_local, r.end_time_local)),
  );

  let tz_name = StoreTimeZone::timezone_for_store(conn, store_id).await?;
  let tz: Tz = tz_name.parse().unwrap_or_else(|_| {
    warn!("store {store_id}: unknown timezone {tz_name:?}, falling back to default");
    sw_core::DEFAULT_TIMEZONE.parse().expect("default timezone is valid")
  });

  let log = StoreStatus::log_for_store(conn, store_id)
    .await?
    .into_iter()
    .map(|obs| StatusLogRow::new(obs.store_id, obs.status, obs.timestamp_utc, tz))
    .collect();

  Ok((hours, log))
}

/// Compute the hour/day/week figures for one store against `anchor`.
/// The status log is read once and shared by all three windows.
pub async fn build_store_report(
  conn: &mut AsyncPgConnection,
  store_id: i64,
  anchor: DateTime<Utc>,
) -> ReportResult<StoreReport> {
  let (hours, log) = load_store_inputs(conn, store_id).await?;

  let (uptime_last_hour, downtime_last_hour) = interpolate::last_hour(&log, &hours, anchor);
  let (uptime_last_day, downtime_last_day) = interpolate::last_day(&log, &hours, anchor);
  let (uptime_last_week, downtime_last_week) = interpolate::last_week(&log, &hours, anchor);

  Ok(StoreReport {
    store_id,
    uptime_last_hour,
    uptime_last_day,
    uptime_last_week,
    downtime_last_hour,
    downtime_last_day,
    downtime_last_week,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn report_serializes_in_artifact_column_order() {
    let report = StoreReport {
      store_id: 42,
      uptime_last_hour: 1,
      uptime_last_day: 2,
      uptime_last_week: 3,
      downtime_last_hour: 4,
      downtime_last_day: 5,
      downtime_last_week: 6,
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(&report).unwrap();
    let bytes = writer.into_inner().unwrap();
    let text = String::from_utf8(bytes).unwrap();

    let mut lines = text.lines();
    assert_eq!(
      lines.next().unwrap(),
      "store_id,uptime_last_hour,uptime_last_day,uptime_last_week,\
       downtime_last_hour,downtime_last_day,downtime_last_week"
    );
    assert_eq!(lines.next().unwrap(), "42,1,2,3,4,5,6");
  }
}
