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

//! Pure uptime/downtime interpolation over a sparse observation log.
//!
//! No I/O, no clock access: the result is a function of the log, the weekly
//! hours table, and the window alone.
//!
//! Known limitation, kept for output compatibility: an interval is gated
//! against business hours using only the *ending* observation's local
//! weekday and time-of-day, so an interval crossing a business-hour
//! boundary is attributed in whole to whichever side its endpoint lies on.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use chrono_tz::Tz;

/// One observation with its local-time projection attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLogRow {
  pub store_id: i64,
  pub is_open: bool,
  pub timestamp_utc: DateTime<Utc>,
  pub timestamp_local: DateTime<Tz>,
}

impl StatusLogRow {
  /// Build a row, projecting the UTC instant into the store's timezone
  pub fn new(store_id: i64, is_open: bool, timestamp_utc: DateTime<Utc>, tz: Tz) -> Self {
    Self { store_id, is_open, timestamp_utc, timestamp_local: timestamp_utc.with_timezone(&tz) }
  }
}

/// Declared open interval per day of week, 0 = Monday through 6 = Sunday.
/// Days with no declared hours count as open the whole day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyHours {
  days: [(NaiveTime, NaiveTime); 7],
}

impl Default for WeeklyHours {
  fn default() -> Self {
    Self::always_open()
  }
}

impl WeeklyHours {
  /// All seven days open `00:00`..`23:59`
  pub fn always_open() -> Self {
    let open = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    let close = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
    Self { days: [(open, close); 7] }
  }

  /// Fill from `(day_of_week, open, close)` rows; days not mentioned keep
  /// the always-open default, rows with an out-of-range day are dropped.
  pub fn from_rows<I>(rows: I) -> Self
  where
    I: IntoIterator<Item = (u8, NaiveTime, NaiveTime)>,
  {
    let mut hours = Self::always_open();
    for (dow, open, close) in rows {
      if let Some(slot) = hours.days.get_mut(dow as usize) {
        *slot = (open, close);
      }
    }
    hours
  }

  pub fn get(&self, dow: u8) -> (NaiveTime, NaiveTime) {
    self.days[dow as usize % 7]
  }
}

/// Half-open UTC interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
}

impl Window {
  pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
    Self { start, end }
  }

  /// Window of `span` length ending at `end`
  pub fn ending_at(end: DateTime<Utc>, span: Duration) -> Self {
    Self { start: end - span, end }
  }
}

/// Accumulate `(uptime, downtime)` for one store over `window`.
///
/// Observations before `window.start` are dropped; observations past
/// `window.end` are still consumed, so a late sample both receives the
/// preceding interval and advances the tail anchor.
pub fn accumulate(log: &[StatusLogRow], hours: &WeeklyHours, window: Window) -> (Duration, Duration) {
  let rows: Vec<&StatusLogRow> = log.iter().filter(|r| r.timestamp_utc >= window.start).collect();

  let Some(&first) = rows.first() else {
    return (Duration::zero(), Duration::zero());
  };

  let mut uptime = Duration::zero();
  let mut downtime = Duration::zero();

  let mut prev: &StatusLogRow = first;
  for &cur in &rows[1..] {
    let dow = cur.timestamp_local.weekday().num_days_from_monday() as u8;
    let (open, close) = hours.get(dow);
    let time_of_day = cur.timestamp_local.time();

    if open <= time_of_day && time_of_day <= close {
      // the whole interval belongs to the state that held since prev
      let delta = cur.timestamp_utc - prev.timestamp_utc;
      if prev.is_open {
        uptime += delta;
      } else {
        downtime += delta;
      }
    }

    prev = cur;
  }

  // tail up to the window end, deliberately not gated by business hours;
  // clamped so a final observation past the end cannot go negative
  let tail = (window.end - prev.timestamp_utc).max(Duration::zero());
  if prev.is_open {
    uptime += tail;
  } else {
    downtime += tail;
  }

  (uptime, downtime)
}

/// Last-hour figures in whole minutes, floored
pub fn last_hour(log: &[StatusLogRow], hours: &WeeklyHours, anchor: DateTime<Utc>) -> (i64, i64) {
  let (up, down) = accumulate(log, hours, Window::ending_at(anchor, Duration::hours(1)));
  (up.num_seconds() / 60, down.num_seconds() / 60)
}

/// Last-day figures in whole hours, floored
pub fn last_day(log: &[StatusLogRow], hours: &WeeklyHours, anchor: DateTime<Utc>) -> (i64, i64) {
  let (up, down) = accumulate(log, hours, Window::ending_at(anchor, Duration::days(1)));
  (up.num_seconds() / 3600, down.num_seconds() / 3600)
}

/// Last-week figures in whole hours, floored
pub fn last_week(log: &[StatusLogRow], hours: &WeeklyHours, anchor: DateTime<Utc>) -> (i64, i64) {
  let (up, down) = accumulate(log, hours, Window::ending_at(anchor, Duration::days(7)));
  (up.num_seconds() / 3600, down.num_seconds() / 3600)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use chrono_tz::Tz;
  use pretty_assertions::assert_eq;

  const UTC_TZ: Tz = chrono_tz::UTC;

  fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
  }

  fn row(is_open: bool, at: DateTime<Utc>) -> StatusLogRow {
    StatusLogRow::new(1, is_open, at, UTC_TZ)
  }

  fn hours_for(dow: u8, open: (u32, u32), close: (u32, u32)) -> WeeklyHours {
    WeeklyHours::from_rows([(
      dow,
      NaiveTime::from_hms_opt(open.0, open.1, 0).unwrap(),
      NaiveTime::from_hms_opt(close.0, close.1, 0).unwrap(),
    )])
  }

  #[test]
  fn empty_log_yields_zero() {
    let (up, down) = accumulate(
      &[],
      &WeeklyHours::always_open(),
      Window::new(utc(2024, 1, 1, 11, 0, 0), utc(2024, 1, 1, 12, 0, 0)),
    );
    assert_eq!(up, Duration::zero());
    assert_eq!(down, Duration::zero());
  }

  #[test]
  fn single_observation_at_window_end_yields_zero() {
    // one sample exactly at the anchor: it survives the start filter, the
    // pair loop never runs, and the tail is zero-length
    let log = [row(true, utc(2024, 1, 1, 12, 0, 0))];
    let anchor = utc(2024, 1, 1, 12, 0, 0);
    let (up, down) = last_hour(&log, &WeeklyHours::always_open(), anchor);
    assert_eq!((up, down), (0, 0));
  }

  #[test]
  fn opposing_observations_split_the_window() {
    // down at T, up at T+600s, anchor T+1200s: the first interval belongs
    // to the down state, the tail to the up state
    let t0 = utc(2024, 1, 1, 0, 0, 0);
    let log = [row(false, t0), row(true, t0 + Duration::seconds(600))];
    let anchor = t0 + Duration::seconds(1200);
    let (up, down) = last_hour(&log, &WeeklyHours::always_open(), anchor);
    assert_eq!((up, down), (10, 10));
  }

  #[test]
  fn observation_outside_business_hours_is_not_attributed() {
    // Monday hours 09:00-17:00; both samples land before opening so the
    // pair interval is skipped, only the (ungated) tail counts
    let monday = utc(2024, 1, 1, 5, 0, 0); // 2024-01-01 is a Monday
    let log = [row(true, monday), row(false, utc(2024, 1, 1, 6, 0, 0))];
    let anchor = utc(2024, 1, 1, 17, 30, 0);
    let hours = hours_for(0, (9, 0), (17, 0));
    let (up, down) = last_day(&log, &hours, anchor);
    assert_eq!((up, down), (0, 11)); // 41400s floored to 11h
  }

  #[test]
  fn tail_is_not_gated_by_business_hours() {
    // single down sample at 03:00 local, store opens 09:00: the tail from
    // 03:00 to the anchor is attributed anyway. Divergence from a strict
    // reading of business-hour bounding, kept for output compatibility.
    let log = [row(false, utc(2024, 1, 1, 3, 0, 0))];
    let anchor = utc(2024, 1, 1, 4, 0, 0);
    let hours = hours_for(0, (9, 0), (17, 0));
    let (up, down) = last_hour(&log, &hours, anchor);
    assert_eq!((up, down), (0, 60));
  }

  #[test]
  fn consumes_observations_past_window_end() {
    // samples past the window end are not clipped: the late `down` sample
    // receives the whole preceding up-interval and pins the tail at zero
    let t0 = utc(2024, 1, 1, 0, 0, 0);
    let log = [row(true, t0), row(false, t0 + Duration::seconds(900))];
    let window = Window::new(t0, t0 + Duration::seconds(600));
    let (up, down) = accumulate(&log, &WeeklyHours::always_open(), window);
    assert_eq!(up, Duration::seconds(900));
    assert_eq!(down, Duration::zero());
  }

  #[test]
  fn observations_before_window_start_are_dropped() {
    let t0 = utc(2024, 1, 1, 12, 0, 0);
    let log = [
      row(false, t0 - Duration::hours(2)), // outside, dropped
      row(true, t0 + Duration::minutes(10)),
    ];
    let anchor = t0 + Duration::hours(1);
    let (up, down) = last_hour(&log, &WeeklyHours::always_open(), anchor);
    // only the tail from the surviving sample counts
    assert_eq!((up, down), (50, 0));
  }

  #[test]
  fn instant_hours_window_gates_on_exact_match() {
    // open == close means the window is a single instant
    let hours = hours_for(0, (12, 0), (12, 0));
    let t0 = utc(2024, 1, 1, 11, 0, 0);

    let on_the_instant = [row(true, t0), row(true, utc(2024, 1, 1, 12, 0, 0))];
    let (up, _) = accumulate(
      &on_the_instant,
      &hours,
      Window::new(t0, utc(2024, 1, 1, 12, 0, 0)),
    );
    assert_eq!(up, Duration::hours(1));

    let just_after = [row(true, t0), row(true, utc(2024, 1, 1, 12, 0, 1))];
    let (up, _) = accumulate(&just_after, &hours, Window::new(t0, utc(2024, 1, 1, 12, 0, 1)));
    assert_eq!(up, Duration::zero());
  }

  #[test]
  fn missing_days_default_to_always_open() {
    let hours = hours_for(1, (9, 0), (17, 0)); // only Tuesday declared
    let open = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    let close = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
    assert_eq!(hours.get(0), (open, close));
    assert_eq!(hours.get(6), (open, close));
    assert_eq!(
      hours.get(1),
      (NaiveTime::from_hms_opt(9, 0, 0).unwrap(), NaiveTime::from_hms_opt(17, 0, 0).unwrap())
    );
  }

  #[test]
  fn gating_uses_local_time_not_utc() {
    // 15:30 UTC is 09:30 in Chicago (January, CST): inside 09:00-17:00
    // local hours even though the UTC time-of-day is not
    let tz: Tz = "America/Chicago".parse().unwrap();
    let t0 = utc(2024, 1, 1, 15, 0, 0);
    let log = [
      StatusLogRow::new(1, true, t0, tz),
      StatusLogRow::new(1, true, utc(2024, 1, 1, 15, 30, 0), tz),
    ];
    let hours = hours_for(0, (9, 0), (17, 0));
    let (up, down) = accumulate(&log, &hours, Window::new(t0, utc(2024, 1, 1, 15, 30, 0)));
    assert_eq!(up, Duration::minutes(30));
    assert_eq!(down, Duration::zero());
  }

  #[test]
  fn results_are_pure() {
    let t0 = utc(2024, 1, 1, 0, 0, 0);
    let log = [row(false, t0), row(true, t0 + Duration::seconds(600))];
    let hours = WeeklyHours::always_open();
    let window = Window::ending_at(t0 + Duration::seconds(1200), Duration::hours(1));
    assert_eq!(accumulate(&log, &hours, window), accumulate(&log, &hours, window));
  }

  #[test]
  fn attribution_stays_within_window_for_in_window_logs() {
    let t0 = utc(2024, 1, 1, 0, 0, 0);
    let log = [
      row(true, t0 + Duration::minutes(5)),
      row(false, t0 + Duration::minutes(20)),
      row(true, t0 + Duration::minutes(45)),
    ];
    let window = Window::new(t0, t0 + Duration::hours(1));
    let (up, down) = accumulate(&log, &WeeklyHours::always_open(), window);
    assert!(up + down <= Duration::hours(1));
    assert!(up >= Duration::zero() && down >= Duration::zero());
  }

  #[test]
  fn units_floor_from_whole_seconds() {
    // 90 seconds of downtime floors to 1 minute; 3599 seconds of uptime
    // floors to 0 hours
    let t0 = utc(2024, 1, 1, 0, 0, 0);
    let log = [row(false, t0)];
    let (_, down_minutes) = last_hour(&log, &WeeklyHours::always_open(), t0 + Duration::seconds(90));
    assert_eq!(down_minutes, 1);

    let log = [row(true, t0)];
    let (up_hours, _) = last_day(&log, &WeeklyHours::always_open(), t0 + Duration::seconds(3599));
    assert_eq!(up_hours, 0);
  }
}
