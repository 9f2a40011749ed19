use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single trade. Only mutates the bar of the interval it falls in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub qty: f64,
}

impl Execution {
    pub fn new(timestamp: DateTime<Utc>, price: f64, qty: f64) -> Self {
        Self {
            timestamp,
            price,
            qty,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.price.is_finite() && self.qty.is_finite() && self.qty >= 0.0
    }
}
