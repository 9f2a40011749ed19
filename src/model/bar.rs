use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::execution::Execution;

/// OHLCV aggregate for one interval. `start` is always an aligned interval start
/// once the bar is stored in a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub start: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(
        start: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            start,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Bar whose open, high, low and close are all `price`.
    pub fn flat(start: DateTime<Utc>, price: f64, volume: f64) -> Self {
        Self::new(start, price, price, price, price, volume)
    }

    /// Start a bar from the first execution seen in its interval.
    pub fn from_execution(start: DateTime<Utc>, exec: &Execution) -> Self {
        Self::flat(start, exec.price, exec.qty)
    }

    /// Merge a trade into this bar. Both extremes are checked on every trade.
    pub fn apply_execution(&mut self, exec: &Execution) {
        self.high = self.high.max(exec.price);
        self.low = self.low.min(exec.price);
        self.close = exec.price;
        self.volume += exec.qty;
    }

    /// Overwrite all five values with `other`, keeping this bar's start.
    pub fn replace_values(&mut self, other: &Bar) {
        self.open = other.open;
        self.high = other.high;
        self.low = other.low;
        self.close = other.close;
        self.volume = other.volume;
    }

    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    pub fn hlc3(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    pub fn is_finite(&self) -> bool {
        [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn exec(price: f64, qty: f64) -> Execution {
        Execution::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), price, qty)
    }

    #[test]
    fn merges_executions() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut bar = Bar::from_execution(start, &exec(100.0, 1.0));
        bar.apply_execution(&exec(105.0, 2.0));
        bar.apply_execution(&exec(95.0, 0.5));
        bar.apply_execution(&exec(102.0, 1.5));

        assert!((bar.open - 100.0).abs() < f64::EPSILON);
        assert!((bar.high - 105.0).abs() < f64::EPSILON);
        assert!((bar.low - 95.0).abs() < f64::EPSILON);
        assert!((bar.close - 102.0).abs() < f64::EPSILON);
        assert!((bar.volume - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn replace_keeps_start() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let other_start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let mut bar = Bar::flat(start, 10.0, 1.0);
        bar.replace_values(&Bar::new(other_start, 1.0, 2.0, 0.5, 1.5, 9.0));
        assert_eq!(bar, Bar::new(start, 1.0, 2.0, 0.5, 1.5, 9.0));
    }

    #[test]
    fn derived_prices() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bar = Bar::new(start, 13.0, 18.0, 10.0, 15.0, 12.0);
        assert!((bar.hl2() - 14.0).abs() < f64::EPSILON);
        assert!((bar.hlc3() - 43.0 / 3.0).abs() < 1e-12);
    }
}
