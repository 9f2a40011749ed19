use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("config error: {0}")]
    Config(String),

    #[error("indicator `{name}` rejected series config: {source}")]
    IndicatorConfig {
        name: String,
        #[source]
        source: IndicatorError,
    },

    #[error("indicator `{name}` failed to update: {source}")]
    IndicatorUpdate {
        name: String,
        #[source]
        source: IndicatorError,
    },

    #[error("observation for interval {start} is older than last bar at {last}")]
    StaleObservation {
        start: DateTime<Utc>,
        last: DateTime<Utc>,
    },

    #[error("malformed input: {0}")]
    MalformedInput(String),
}

#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("period must be > 0")]
    ZeroPeriod,

    #[error("{indicator} window of {window} exceeds configured max of {max} bars")]
    WindowExceedsMax {
        indicator: &'static str,
        window: usize,
        max: usize,
    },

    #[error("{indicator} source error: {source}")]
    Source {
        indicator: &'static str,
        #[source]
        source: Box<IndicatorError>,
    },
}

impl IndicatorError {
    /// Wrap an error returned by an upstream indicator.
    pub fn upstream(indicator: &'static str, err: IndicatorError) -> Self {
        IndicatorError::Source {
            indicator,
            source: Box::new(err),
        }
    }
}
