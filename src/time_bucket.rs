//! UTC interval alignment.
//!
//! Interval boundaries are anchored at UTC midnight and reset every day, so an
//! interval that does not divide 24h leaves a shorter final bucket before
//! midnight. Intervals longer than a day collapse to daily buckets.

use chrono::{DateTime, Days, Duration, NaiveTime, Utc};

/// Number of seconds in a day.
pub const SECS_PER_DAY: i64 = 86_400;

/// Start of the UTC calendar day containing `ts`.
pub fn day_start(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Map `ts` to the start of the `interval_secs` bucket that contains it.
///
/// Sub-second precision is dropped; the result is always a whole second.
pub fn align_to_interval(ts: DateTime<Utc>, interval_secs: u64) -> DateTime<Utc> {
    assert!(interval_secs > 0, "interval_secs must be > 0");
    let start = day_start(ts);
    let offset = ts.signed_duration_since(start).num_seconds();
    let width = interval_secs.min(SECS_PER_DAY as u64) as i64;
    start + Duration::seconds(offset - offset % width)
}

/// The interval start immediately following the aligned `start`.
pub fn next_interval_start(start: DateTime<Utc>, interval_secs: u64) -> DateTime<Utc> {
    let width = interval_secs.min(SECS_PER_DAY as u64) as i64;
    let candidate = start + Duration::seconds(width);
    match day_start(start).checked_add_days(Days::new(1)) {
        Some(next_day) => candidate.min(next_day),
        None => candidate,
    }
}
