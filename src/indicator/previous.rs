use chrono::{DateTime, Duration, Utc};

use super::{check_window, Indicator};
use crate::config::SeriesConfig;
use crate::error::IndicatorError;
use crate::model::Bar;

/// The source's value `lookback` intervals before the queried one.
///
/// The shift is `lookback * interval_secs` of wall time, so with a sparse
/// series (`EmptyIntervalPolicy::Ignore`) the target interval may have no bar
/// and the result is `None`.
#[derive(Debug)]
pub struct Previous {
    source: Box<dyn Indicator>,
    lookback: usize,
    interval_secs: Option<u64>,
}

impl Previous {
    pub fn new(source: impl Indicator + 'static, lookback: usize) -> Self {
        Self {
            source: Box::new(source),
            lookback,
            interval_secs: None,
        }
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    fn shift(&self) -> Option<Duration> {
        let secs = self.interval_secs?.checked_mul(self.lookback as u64)?;
        Duration::try_seconds(i64::try_from(secs).ok()?)
    }
}

impl Indicator for Previous {
    fn apply_config(&mut self, config: &SeriesConfig) -> Result<(), IndicatorError> {
        self.source
            .apply_config(config)
            .map_err(|e| IndicatorError::upstream("previous", e))?;
        check_window("previous", self.lookback, config)?;
        self.interval_secs = Some(config.interval_secs);
        Ok(())
    }

    fn update(&mut self, bar: &Bar) -> Result<(), IndicatorError> {
        self.source
            .update(bar)
            .map_err(|e| IndicatorError::upstream("previous", e))
    }

    fn value_at(&self, start: DateTime<Utc>) -> Option<f64> {
        let target = start.checked_sub_signed(self.shift()?)?;
        self.source.value_at(target)
    }
}
