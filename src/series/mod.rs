//! Bar aggregation engine.
//!
//! Executions and externally aggregated bars share one ingestion path: resolve
//! the interval, fill any gap after the last bar, then either revise the last
//! bar (merge for executions, full replace for bars) or append a new one. Every
//! bar that is appended or revised is pushed to all registered indicators in
//! chronological order.

pub mod gap;
pub mod store;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::config::{SeriesConfig, StaleInputPolicy};
use crate::error::SeriesError;
use crate::indicator::Indicator;
use crate::model::{Bar, Execution, Interval};
use crate::time_bucket::align_to_interval;

pub use store::BarStore;

// Upper bound on up-front allocation; `max_bars` is only advisory.
const PREALLOC_BARS: usize = 4_096;

/// How the bar for the observed interval is derived.
#[derive(Debug, Clone, Copy)]
enum Observation {
    Execution(Execution),
    Bar(Bar),
}

impl Observation {
    fn open_bar(&self, start: DateTime<Utc>) -> Bar {
        match self {
            Observation::Execution(exec) => Bar::from_execution(start, exec),
            Observation::Bar(bar) => Bar { start, ..*bar },
        }
    }

    fn revise(&self, bar: &mut Bar) {
        match self {
            Observation::Execution(exec) => bar.apply_execution(exec),
            Observation::Bar(incoming) => bar.replace_values(incoming),
        }
    }
}

/// OHLCV series for one instrument plus its named indicators.
///
/// Not internally synchronized: all mutation goes through `&mut self`.
#[derive(Debug)]
pub struct Series {
    config: SeriesConfig,
    store: BarStore,
    indicators: BTreeMap<String, Box<dyn Indicator>>,
    last_exec: Option<Execution>,
}

impl Series {
    /// Build a series from `initial` bars. Bars are aligned to their interval
    /// and ordered by start; of several bars in the same interval only the
    /// first one given is kept. No gap filling happens on preload.
    pub fn new(
        initial: impl IntoIterator<Item = Bar>,
        config: SeriesConfig,
    ) -> Result<Self, SeriesError> {
        config.validate()?;

        let mut bars = Vec::new();
        for mut bar in initial {
            if !bar.is_finite() {
                return Err(SeriesError::MalformedInput(format!(
                    "initial bar at {} has non-finite values",
                    bar.start
                )));
            }
            bar.start = align_to_interval(bar.start, config.interval_secs);
            bars.push(bar);
        }
        bars.sort_by_key(|b| b.start);

        let mut store = BarStore::with_capacity(config.max_bars.min(PREALLOC_BARS));
        let mut duplicates = 0usize;
        for bar in bars {
            if !store.push(bar) {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            tracing::debug!(duplicates, "Collapsed initial bars sharing an interval");
        }

        Ok(Self {
            config,
            store,
            indicators: BTreeMap::new(),
            last_exec: None,
        })
    }

    /// Register `indicator` under `name`, replacing any indicator already
    /// registered there. Every stored bar is replayed through it first.
    pub fn add_indicator(
        &mut self,
        name: impl Into<String>,
        indicator: impl Indicator + 'static,
    ) -> Result<(), SeriesError> {
        let name = name.into();
        let mut indicator: Box<dyn Indicator> = Box::new(indicator);
        if let Err(source) = indicator.apply_config(&self.config) {
            return Err(SeriesError::IndicatorConfig { name, source });
        }
        for bar in self.store.bars() {
            if let Err(source) = indicator.update(bar) {
                return Err(SeriesError::IndicatorUpdate { name, source });
            }
        }

        tracing::info!(
            indicator = %name,
            replayed = self.store.len(),
            "Indicator registered"
        );
        if self.indicators.insert(name.clone(), indicator).is_some() {
            tracing::debug!(indicator = %name, "Replaced existing indicator");
        }
        Ok(())
    }

    /// Fold a trade into the bar of its interval.
    pub fn add_exec(&mut self, exec: Execution) -> Result<(), SeriesError> {
        if !exec.is_well_formed() {
            return Err(SeriesError::MalformedInput(format!(
                "execution at {} has price {} qty {}",
                exec.timestamp, exec.price, exec.qty
            )));
        }
        let start = align_to_interval(exec.timestamp, self.config.interval_secs);
        self.ingest(start, Observation::Execution(exec))?;
        self.last_exec = Some(exec);
        Ok(())
    }

    /// Insert a pre-aggregated bar. A bar for an existing interval replaces all
    /// five values of the stored bar.
    pub fn add_ohlcv(&mut self, bar: Bar) -> Result<(), SeriesError> {
        if !bar.is_finite() {
            return Err(SeriesError::MalformedInput(format!(
                "bar at {} has non-finite values",
                bar.start
            )));
        }
        let start = align_to_interval(bar.start, self.config.interval_secs);
        self.ingest(start, Observation::Bar(bar))
    }

    /// Bar and indicator values for the interval containing `ts`.
    pub fn value_for_interval(&self, ts: DateTime<Utc>) -> Option<Interval> {
        let last = self.store.last()?;
        let start = if last.start == ts {
            ts
        } else {
            align_to_interval(ts, self.config.interval_secs)
        };
        let bar = *self.store.get(start)?;
        let indicators = self
            .indicators
            .iter()
            .filter_map(|(name, ind)| ind.value_at(start).map(|v| (name.clone(), v)))
            .collect();
        Some(Interval {
            start,
            bar,
            indicators,
        })
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    pub fn bars(&self) -> &[Bar] {
        self.store.bars()
    }

    pub fn last_bar(&self) -> Option<&Bar> {
        self.store.last()
    }

    pub fn last_execution(&self) -> Option<&Execution> {
        self.last_exec.as_ref()
    }

    pub fn indicator_names(&self) -> impl Iterator<Item = &str> {
        self.indicators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn ingest(&mut self, start: DateTime<Utc>, obs: Observation) -> Result<(), SeriesError> {
        let Some(last) = self.store.last().copied() else {
            return self.append(obs.open_bar(start));
        };

        if start == last.start {
            if let Some(bar) = self.store.last_mut() {
                obs.revise(bar);
                let revised = *bar;
                return self.propagate(&revised);
            }
            return Ok(());
        }

        if start < last.start {
            return match self.config.stale_input {
                StaleInputPolicy::Ignore => {
                    tracing::warn!(
                        interval = %start,
                        last = %last.start,
                        "Ignoring observation older than last bar"
                    );
                    Ok(())
                }
                StaleInputPolicy::Reject => Err(SeriesError::StaleObservation {
                    start,
                    last: last.start,
                }),
            };
        }

        let fillers = gap::fill_gap(
            self.config.empty_interval,
            &last,
            start,
            self.config.interval_secs,
        );
        if !fillers.is_empty() {
            tracing::debug!(
                count = fillers.len(),
                policy = ?self.config.empty_interval,
                from = %last.start,
                to = %start,
                "Filling empty intervals"
            );
        }
        for filler in fillers {
            self.append(filler)?;
        }
        self.append(obs.open_bar(start))
    }

    fn append(&mut self, bar: Bar) -> Result<(), SeriesError> {
        if !self.store.push(bar) {
            return Ok(());
        }
        if self.store.len() - 1 == self.config.max_bars {
            tracing::warn!(
                max_bars = self.config.max_bars,
                "Bar count exceeded configured max; retention is not enforced"
            );
        }
        self.propagate(&bar)
    }

    fn propagate(&mut self, bar: &Bar) -> Result<(), SeriesError> {
        for (name, indicator) in self.indicators.iter_mut() {
            if let Err(source) = indicator.update(bar) {
                return Err(SeriesError::IndicatorUpdate {
                    name: name.clone(),
                    source,
                });
            }
        }
        Ok(())
    }
}
