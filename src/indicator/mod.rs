//! Stateful, time-queryable indicators.
//!
//! Every indicator goes through the same lifecycle: [`Indicator::apply_config`]
//! once, then [`Indicator::update`] for each bar in chronological order. A bar
//! may be pushed more than once while its interval is still open (trade merges
//! or bar replacement); indicators treat a repeated start as a revision of the
//! current interval, not a new sample. [`Indicator::value_at`] never mutates
//! state.
//!
//! Wrapping indicators (`Sma`, `StdDev`, `Ema`, `Previous`) own their source and
//! forward configuration and updates to it before doing their own work.

pub mod constant;
pub mod ema;
pub mod ohlc_prop;
pub mod previous;
pub mod sma;
pub mod spec;
pub mod std_dev;
mod window;

use std::fmt;

use chrono::{DateTime, Utc};

use crate::config::SeriesConfig;
use crate::error::IndicatorError;
use crate::model::Bar;

pub use constant::Constant;
pub use ema::Ema;
pub use ohlc_prop::{OhlcField, OhlcProp};
pub use previous::Previous;
pub use sma::Sma;
pub use spec::IndicatorSpec;
pub use std_dev::StdDev;

pub trait Indicator: fmt::Debug + Send {
    /// Called once before any update. May reject the config, e.g. when the
    /// indicator's window exceeds `config.max_bars`.
    fn apply_config(&mut self, config: &SeriesConfig) -> Result<(), IndicatorError>;

    /// Feed the latest state of the bar at `bar.start`.
    fn update(&mut self, bar: &Bar) -> Result<(), IndicatorError>;

    /// Value for the interval starting at `start`, or `None` during warm-up or
    /// for an unknown interval.
    fn value_at(&self, start: DateTime<Utc>) -> Option<f64>;
}

impl<I: Indicator + ?Sized> Indicator for Box<I> {
    fn apply_config(&mut self, config: &SeriesConfig) -> Result<(), IndicatorError> {
        (**self).apply_config(config)
    }

    fn update(&mut self, bar: &Bar) -> Result<(), IndicatorError> {
        (**self).update(bar)
    }

    fn value_at(&self, start: DateTime<Utc>) -> Option<f64> {
        (**self).value_at(start)
    }
}

/// Shared config check for indicators that look back `window` bars.
pub(crate) fn check_window(
    indicator: &'static str,
    window: usize,
    config: &SeriesConfig,
) -> Result<(), IndicatorError> {
    if window > config.max_bars {
        return Err(IndicatorError::WindowExceedsMax {
            indicator,
            window,
            max: config.max_bars,
        });
    }
    Ok(())
}
