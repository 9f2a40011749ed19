use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Indicator;
use crate::config::SeriesConfig;
use crate::error::IndicatorError;
use crate::model::Bar;

/// Which value of a bar to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OhlcField {
    Open,
    High,
    Low,
    Close,
    Volume,
    /// (high + low) / 2
    Hl2,
    /// (high + low + close) / 3
    Hlc3,
}

impl OhlcField {
    pub fn extract(self, bar: &Bar) -> f64 {
        match self {
            OhlcField::Open => bar.open,
            OhlcField::High => bar.high,
            OhlcField::Low => bar.low,
            OhlcField::Close => bar.close,
            OhlcField::Volume => bar.volume,
            OhlcField::Hl2 => bar.hl2(),
            OhlcField::Hlc3 => bar.hlc3(),
        }
    }
}

/// Selects one value from each bar. Usually the root of an indicator chain.
#[derive(Debug, Clone)]
pub struct OhlcProp {
    field: OhlcField,
    values: HashMap<DateTime<Utc>, f64>,
}

impl OhlcProp {
    pub fn new(field: OhlcField) -> Self {
        Self {
            field,
            values: HashMap::new(),
        }
    }

    pub fn close() -> Self {
        Self::new(OhlcField::Close)
    }

    pub fn field(&self) -> OhlcField {
        self.field
    }
}

impl Indicator for OhlcProp {
    fn apply_config(&mut self, _config: &SeriesConfig) -> Result<(), IndicatorError> {
        Ok(())
    }

    fn update(&mut self, bar: &Bar) -> Result<(), IndicatorError> {
        self.values.insert(bar.start, self.field.extract(bar));
        Ok(())
    }

    fn value_at(&self, start: DateTime<Utc>) -> Option<f64> {
        self.values.get(&start).copied()
    }
}
