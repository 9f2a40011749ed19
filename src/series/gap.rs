use chrono::{DateTime, Utc};

use crate::config::EmptyIntervalPolicy;
use crate::model::Bar;
use crate::time_bucket::next_interval_start;

/// Filler bars for the intervals strictly between `last` and `target`.
///
/// Walks real interval starts, so a day whose length is not a multiple of the
/// interval still gets its short final bucket filled.
pub fn fill_gap(
    policy: EmptyIntervalPolicy,
    last: &Bar,
    target: DateTime<Utc>,
    interval_secs: u64,
) -> Vec<Bar> {
    let price = match policy {
        EmptyIntervalPolicy::Ignore => return Vec::new(),
        EmptyIntervalPolicy::UseLastClose => last.close,
        EmptyIntervalPolicy::UseZeros => 0.0,
    };

    let mut fillers = Vec::new();
    let mut cursor = next_interval_start(last.start, interval_secs);
    while cursor < target {
        fillers.push(Bar::flat(cursor, price, 0.0));
        cursor = next_interval_start(cursor, interval_secs);
    }
    fillers
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(min: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(min)
    }

    #[test]
    fn last_close_fills_each_missing_interval() {
        let last = Bar::new(at(0), 10.0, 12.0, 9.0, 11.0, 5.0);
        let fillers = fill_gap(EmptyIntervalPolicy::UseLastClose, &last, at(20), 300);
        assert_eq!(fillers.len(), 3);
        for (i, f) in fillers.iter().enumerate() {
            assert_eq!(*f, Bar::flat(at(5 * (i as i64 + 1)), 11.0, 0.0));
        }
    }

    #[test]
    fn zeros_policy() {
        let last = Bar::flat(at(0), 10.0, 5.0);
        let fillers = fill_gap(EmptyIntervalPolicy::UseZeros, &last, at(10), 300);
        assert_eq!(fillers, vec![Bar::flat(at(5), 0.0, 0.0)]);
    }

    #[test]
    fn ignore_policy_fills_nothing() {
        let last = Bar::flat(at(0), 10.0, 5.0);
        assert!(fill_gap(EmptyIntervalPolicy::Ignore, &last, at(60), 300).is_empty());
    }

    #[test]
    fn adjacent_interval_needs_no_filler() {
        let last = Bar::flat(at(0), 10.0, 5.0);
        assert!(fill_gap(EmptyIntervalPolicy::UseLastClose, &last, at(5), 300).is_empty());
    }

    #[test]
    fn crosses_midnight_with_uneven_interval() {
        // 7h buckets: 14:00, 21:00 (short), then next day 00:00, 07:00
        let last = Bar::flat(at(14 * 60), 1.0, 1.0);
        let fillers = fill_gap(
            EmptyIntervalPolicy::UseLastClose,
            &last,
            at(24 * 60 + 7 * 60),
            7 * 3600,
        );
        let starts: Vec<_> = fillers.iter().map(|b| b.start).collect();
        assert_eq!(starts, vec![at(21 * 60), at(24 * 60)]);
    }
}
