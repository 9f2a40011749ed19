use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::bar::Bar;

/// Result of a point-in-time series query.
///
/// `indicators` only holds entries for indicators that produced a value for
/// this interval; warm-up and missing data are absent rather than errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub bar: Bar,
    pub indicators: HashMap<String, f64>,
}

impl Interval {
    pub fn indicator(&self, name: &str) -> Option<f64> {
        self.indicators.get(name).copied()
    }
}
