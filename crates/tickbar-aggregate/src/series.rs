//! Ordered collection of bars keyed by bucket start.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::Bar;

/// A bar already exists for the bucket being inserted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("A bar already exists for bucket {0}")]
pub struct DuplicateBucket(pub DateTime<Utc>);

/// Time-ordered bars for one instrument, at most one per bucket.
///
/// Iteration is always chronological, whatever order the bars were
/// inserted in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    bars: BTreeMap<DateTime<Utc>, Bar>,
}

impl BarSeries {
    /// Creates an empty series.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bars: BTreeMap::new(),
        }
    }

    /// Returns the number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if the series holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns the bar for a bucket.
    #[must_use]
    pub fn get(&self, bucket_start: &DateTime<Utc>) -> Option<&Bar> {
        self.bars.get(bucket_start)
    }

    /// Returns true if a bar exists for the bucket.
    #[must_use]
    pub fn contains(&self, bucket_start: &DateTime<Utc>) -> bool {
        self.bars.contains_key(bucket_start)
    }

    /// Inserts a new bar.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateBucket`] if the series already holds a bar for the
    /// same bucket; the existing bar is left untouched.
    pub fn insert(&mut self, bar: Bar) -> Result<(), DuplicateBucket> {
        match self.bars.entry(bar.bucket_start) {
            Entry::Occupied(_) => Err(DuplicateBucket(bar.bucket_start)),
            Entry::Vacant(slot) => {
                slot.insert(bar);
                Ok(())
            }
        }
    }

    /// Inserts a bar, returning the one it replaced.
    pub(crate) fn replace(&mut self, bar: Bar) -> Option<Bar> {
        self.bars.insert(bar.bucket_start, bar)
    }

    pub(crate) fn entry(&mut self, bucket_start: DateTime<Utc>) -> Entry<'_, DateTime<Utc>, Bar> {
        self.bars.entry(bucket_start)
    }

    /// Returns the oldest bar.
    #[must_use]
    pub fn first(&self) -> Option<&Bar> {
        self.bars.values().next()
    }

    /// Returns the most recent bar.
    #[must_use]
    pub fn last(&self) -> Option<&Bar> {
        self.bars.values().next_back()
    }

    /// Iterates over bars in chronological order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Bar> + ExactSizeIterator {
        self.bars.values()
    }

    /// Copies every bar, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Bar> {
        self.bars.values().copied().collect()
    }

    /// Copies the `n` most recent bars, oldest first.
    #[must_use]
    pub fn window(&self, n: usize) -> Vec<Bar> {
        let skip = self.bars.len().saturating_sub(n);
        self.bars.values().skip(skip).copied().collect()
    }
}

impl<'a> IntoIterator for &'a BarSeries {
    type Item = &'a Bar;
    type IntoIter = std::collections::btree_map::Values<'a, DateTime<Utc>, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.values()
    }
}
