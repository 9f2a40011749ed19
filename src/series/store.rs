use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::model::Bar;

/// Append-only bars in chronological order with O(1) lookup by interval start.
#[derive(Debug, Clone, Default)]
pub struct BarStore {
    bars: Vec<Bar>,
    index: HashMap<DateTime<Utc>, usize>,
}

impl BarStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bars: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Append `bar`. Returns false (and stores nothing) if its interval is
    /// already present or it does not come after the current last bar.
    pub fn push(&mut self, bar: Bar) -> bool {
        if self.index.contains_key(&bar.start) {
            return false;
        }
        if self.last().is_some_and(|last| last.start > bar.start) {
            return false;
        }
        self.index.insert(bar.start, self.bars.len());
        self.bars.push(bar);
        true
    }

    pub fn get(&self, start: DateTime<Utc>) -> Option<&Bar> {
        self.index.get(&start).map(|&i| &self.bars[i])
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Bar> {
        self.bars.last_mut()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(i: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(5 * i)
    }

    #[test]
    fn push_and_lookup() {
        let mut store = BarStore::default();
        assert!(store.push(Bar::flat(at(0), 1.0, 1.0)));
        assert!(store.push(Bar::flat(at(1), 2.0, 1.0)));
        assert_eq!(store.len(), 2);
        assert!((store.get(at(1)).unwrap().close - 2.0).abs() < f64::EPSILON);
        assert_eq!(store.last().unwrap().start, at(1));
        assert!(store.get(at(2)).is_none());
    }

    #[test]
    fn rejects_duplicate_and_older_starts() {
        let mut store = BarStore::default();
        assert!(store.push(Bar::flat(at(1), 1.0, 1.0)));
        assert!(!store.push(Bar::flat(at(1), 9.0, 1.0)));
        assert!(!store.push(Bar::flat(at(0), 9.0, 1.0)));
        assert_eq!(store.len(), 1);
        assert!((store.get(at(1)).unwrap().close - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn last_mut_updates_indexed_bar() {
        let mut store = BarStore::default();
        store.push(Bar::flat(at(0), 1.0, 1.0));
        if let Some(bar) = store.last_mut() {
            bar.close = 3.0;
        }
        assert!((store.get(at(0)).unwrap().close - 3.0).abs() < f64::EPSILON);
    }
}
