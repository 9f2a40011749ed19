use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::window::TrailingWindow;
use super::{check_window, Indicator};
use crate::config::SeriesConfig;
use crate::error::IndicatorError;
use crate::model::Bar;

/// Exponential moving average, seeded with the SMA of the first `period`
/// source values.
#[derive(Debug)]
pub struct Ema {
    source: Box<dyn Indicator>,
    multiplier: f64,
    // Only consulted until the first EMA value exists
    seed: TrailingWindow,
    // EMA of the interval before `current`
    prev: Option<f64>,
    current: Option<(DateTime<Utc>, Option<f64>)>,
    values: HashMap<DateTime<Utc>, f64>,
}

impl Ema {
    pub fn new(source: impl Indicator + 'static, period: usize) -> Self {
        Self {
            source: Box::new(source),
            multiplier: 2.0 / (period as f64 + 1.0),
            seed: TrailingWindow::new(period),
            prev: None,
            current: None,
            values: HashMap::new(),
        }
    }

    pub fn period(&self) -> usize {
        self.seed.period()
    }

    pub fn is_ready(&self) -> bool {
        self.prev.is_some() || matches!(self.current, Some((_, Some(_))))
    }
}

impl Indicator for Ema {
    fn apply_config(&mut self, config: &SeriesConfig) -> Result<(), IndicatorError> {
        self.source
            .apply_config(config)
            .map_err(|e| IndicatorError::upstream("ema", e))?;
        if self.period() == 0 {
            return Err(IndicatorError::ZeroPeriod);
        }
        check_window("ema", self.period(), config)
    }

    fn update(&mut self, bar: &Bar) -> Result<(), IndicatorError> {
        self.source
            .update(bar)
            .map_err(|e| IndicatorError::upstream("ema", e))?;
        let Some(value) = self.source.value_at(bar.start) else {
            return Ok(());
        };

        if let Some((start, ema)) = self.current {
            if start != bar.start {
                self.prev = ema;
            }
        }

        let ema = match self.prev {
            Some(prev) => Some((value - prev) * self.multiplier + prev),
            None => {
                self.seed.push(bar.start, value);
                self.seed.mean()
            }
        };
        self.current = Some((bar.start, ema));
        if let Some(ema) = ema {
            self.values.insert(bar.start, ema);
        }
        Ok(())
    }

    fn value_at(&self, start: DateTime<Utc>) -> Option<f64> {
        self.values.get(&start).copied()
    }
}
