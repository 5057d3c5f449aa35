//! Statistics constants and month-bucketing helpers.
//!
//! The SQL group-by only yields months that actually have reports; the
//! trend view needs every month of the trailing window present, so
//! [`zero_fill_months`] expands the sparse result into a dense,
//! chronologically ordered series.

use chrono::{Datelike, Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::types::Timestamp;

/// Reports still in the initial state older than this many days count as
/// overdue. Overridable via configuration.
pub const DEFAULT_OVERDUE_AFTER_DAYS: i64 = 7;

/// Length of the monthly trend window.
pub const TREND_MONTHS: usize = 12;

/// One month of the creation trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub count: i64,
}

/// The trailing [`TREND_MONTHS`] `(year, month)` pairs ending with the month
/// of `today`, in chronological order.
pub fn trailing_months(today: NaiveDate) -> Vec<(i32, u32)> {
    let end = i64::from(today.year()) * 12 + i64::from(today.month0());
    (0..TREND_MONTHS as i64)
        .rev()
        .map(|back| {
            let total = end - back;
            (total.div_euclid(12) as i32, (total.rem_euclid(12) + 1) as u32)
        })
        .collect()
}

/// First day of the oldest month in the trend window; used as the SQL
/// cutoff so the window is month-aligned.
pub fn trend_window_start(today: NaiveDate) -> NaiveDate {
    let (year, month) = trailing_months(today)[0];
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always valid")
}

/// UTC bounds of the server-local calendar day containing `now`.
///
/// The "today" counter follows the server clock, matching what facility
/// staff see on the wall; storage stays UTC.
pub fn local_day_bounds(now: Timestamp) -> (Timestamp, Timestamp) {
    let date = now.with_timezone(&Local).date_naive();
    (local_midnight(date), local_midnight(date + chrono::Days::new(1)))
}

fn local_midnight(date: NaiveDate) -> Timestamp {
    let naive = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        // A DST jump can make local midnight nonexistent; fall back to UTC.
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// Expand sparse `(year, month, count)` rows into a dense series covering
/// the whole trend window, with zero counts for empty months.
pub fn zero_fill_months(today: NaiveDate, sparse: &[(i32, u32, i64)]) -> Vec<MonthBucket> {
    trailing_months(today)
        .into_iter()
        .map(|(year, month)| {
            let count = sparse
                .iter()
                .find(|(y, m, _)| *y == year && *m == month)
                .map_or(0, |(_, _, c)| *c);
            MonthBucket { year, month, count }
        })
        .collect()
}
