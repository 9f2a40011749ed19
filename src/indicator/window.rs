use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Trailing window of one sample per interval with a running sum for O(1) mean.
///
/// Pushing a sample for the interval already at the back replaces it.
#[derive(Debug, Clone)]
pub(crate) struct TrailingWindow {
    period: usize,
    samples: VecDeque<(DateTime<Utc>, f64)>,
    sum: f64,
}

impl TrailingWindow {
    pub(crate) fn new(period: usize) -> Self {
        Self {
            period,
            samples: VecDeque::with_capacity(period),
            sum: 0.0,
        }
    }

    pub(crate) fn push(&mut self, start: DateTime<Utc>, value: f64) {
        match self.samples.back_mut() {
            Some((last, old)) if *last == start => {
                self.sum -= *old;
                *old = value;
            }
            _ => {
                self.samples.push_back((start, value));
                while self.samples.len() > self.period {
                    if let Some((_, dropped)) = self.samples.pop_front() {
                        self.sum -= dropped;
                    }
                }
            }
        }
        self.sum += value;
        // a zero-period window never holds the sample it just summed
        if self.samples.is_empty() {
            self.sum = 0.0;
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.period > 0 && self.samples.len() == self.period
    }

    pub(crate) fn mean(&self) -> Option<f64> {
        if self.is_full() {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }

    /// Population standard deviation (divides by the period).
    pub(crate) fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let variance = self
            .samples
            .iter()
            .map(|(_, v)| {
                let d = *v - mean;
                d * d
            })
            .sum::<f64>()
            / self.period as f64;
        Some(variance.sqrt())
    }

    pub(crate) fn period(&self) -> usize {
        self.period
    }
}
