use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::Indicator;
use crate::config::SeriesConfig;
use crate::error::IndicatorError;
use crate::model::Bar;

/// Fixed value for every interval that has a bar.
#[derive(Debug, Clone)]
pub struct Constant {
    value: f64,
    seen: HashSet<DateTime<Utc>>,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            seen: HashSet::new(),
        }
    }
}

impl Indicator for Constant {
    fn apply_config(&mut self, _config: &SeriesConfig) -> Result<(), IndicatorError> {
        Ok(())
    }

    fn update(&mut self, bar: &Bar) -> Result<(), IndicatorError> {
        self.seen.insert(bar.start);
        Ok(())
    }

    fn value_at(&self, start: DateTime<Utc>) -> Option<f64> {
        self.seen.contains(&start).then_some(self.value)
    }
}
