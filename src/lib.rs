//! Incremental OHLCV series for a single instrument.
//!
//! Executions or pre-aggregated bars are aligned to fixed, UTC-midnight
//! anchored intervals and folded into a [`Series`]. Missing intervals are
//! synthesized according to an [`EmptyIntervalPolicy`], and every created or
//! mutated bar is pushed through the registered [`Indicator`]s, which can then
//! be queried by absolute time.
//!
//! A `Series` is single-writer: it takes `&mut self` for ingestion and
//! registration and performs no internal locking. Hosts that feed it from
//! several threads must serialize access themselves, e.g. by owning it in one
//! task or wrapping it in a `Mutex`.

pub mod config;
pub mod error;
pub mod indicator;
pub mod model;
pub mod series;
pub mod time_bucket;

pub use config::{EmptyIntervalPolicy, SeriesConfig, StaleInputPolicy};
pub use error::{IndicatorError, SeriesError};
pub use indicator::Indicator;
pub use model::{Bar, Execution, Interval};
pub use series::Series;
