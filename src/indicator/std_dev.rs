use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::window::TrailingWindow;
use super::{check_window, Indicator};
use crate::config::SeriesConfig;
use crate::error::IndicatorError;
use crate::model::Bar;

/// Population standard deviation of the trailing `period` source values.
#[derive(Debug)]
pub struct StdDev {
    source: Box<dyn Indicator>,
    window: TrailingWindow,
    values: HashMap<DateTime<Utc>, f64>,
}

impl StdDev {
    pub fn new(source: impl Indicator + 'static, period: usize) -> Self {
        Self {
            source: Box::new(source),
            window: TrailingWindow::new(period),
            values: HashMap::new(),
        }
    }

    pub fn period(&self) -> usize {
        self.window.period()
    }
}

impl Indicator for StdDev {
    fn apply_config(&mut self, config: &SeriesConfig) -> Result<(), IndicatorError> {
        self.source
            .apply_config(config)
            .map_err(|e| IndicatorError::upstream("stddev", e))?;
        if self.period() == 0 {
            return Err(IndicatorError::ZeroPeriod);
        }
        check_window("stddev", self.period(), config)
    }

    fn update(&mut self, bar: &Bar) -> Result<(), IndicatorError> {
        self.source
            .update(bar)
            .map_err(|e| IndicatorError::upstream("stddev", e))?;
        let Some(value) = self.source.value_at(bar.start) else {
            return Ok(());
        };
        self.window.push(bar.start, value);
        if let Some(sd) = self.window.std_dev() {
            self.values.insert(bar.start, sd);
        }
        Ok(())
    }

    fn value_at(&self, start: DateTime<Utc>) -> Option<f64> {
        self.values.get(&start).copied()
    }
}
