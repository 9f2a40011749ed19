use serde::{Deserialize, Serialize};

use super::{Constant, Ema, Indicator, OhlcField, OhlcProp, Previous, Sma, StdDev};

/// Declarative indicator tree, e.g. from a TOML config:
///
/// ```toml
/// kind = "sma"
/// period = 20
/// source = { kind = "ohlc", field = "close" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorSpec {
    Ohlc {
        field: OhlcField,
    },
    Constant {
        value: f64,
    },
    Sma {
        source: Box<IndicatorSpec>,
        period: usize,
    },
    StdDev {
        source: Box<IndicatorSpec>,
        period: usize,
    },
    Ema {
        source: Box<IndicatorSpec>,
        period: usize,
    },
    Previous {
        source: Box<IndicatorSpec>,
        lookback: usize,
    },
}

impl IndicatorSpec {
    pub fn build(&self) -> Box<dyn Indicator> {
        match self {
            IndicatorSpec::Ohlc { field } => Box::new(OhlcProp::new(*field)),
            IndicatorSpec::Constant { value } => Box::new(Constant::new(*value)),
            IndicatorSpec::Sma { source, period } => Box::new(Sma::new(source.build(), *period)),
            IndicatorSpec::StdDev { source, period } => {
                Box::new(StdDev::new(source.build(), *period))
            }
            IndicatorSpec::Ema { source, period } => Box::new(Ema::new(source.build(), *period)),
            IndicatorSpec::Previous { source, lookback } => {
                Box::new(Previous::new(source.build(), *lookback))
            }
        }
    }
}
