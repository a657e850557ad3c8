//! Bar series shared between one producer and periodic readers.

use std::sync::Arc;

use parking_lot::RwLock;
use tickbar_types::TickRecord;

use crate::{Applied, Bar, BarSeries, TickAggregator};

/// Cloneable handle to a lock-guarded [`BarSeries`].
///
/// Each [`apply`](Self::apply) holds the write lock across the whole
/// lookup-then-mutate, so concurrent producers never lose an update. Readers
/// only ever receive owned copies taken under the read lock and never
/// observe a bar mid-update.
#[derive(Debug, Clone, Default)]
pub struct SharedSeries {
    series: Arc<RwLock<BarSeries>>,
    aggregator: TickAggregator,
}

impl SharedSeries {
    /// Wraps a series, typically one produced by [`seed`](crate::seed).
    #[must_use]
    pub fn new(series: BarSeries, aggregator: TickAggregator) -> Self {
        Self {
            series: Arc::new(RwLock::new(series)),
            aggregator,
        }
    }

    /// Returns the aggregator used by [`apply`](Self::apply).
    #[must_use]
    pub const fn aggregator(&self) -> TickAggregator {
        self.aggregator
    }

    /// Applies a tick atomically with respect to every other handle.
    pub fn apply(&self, tick: &TickRecord) -> Applied {
        let mut series = self.series.write();
        self.aggregator.apply(&mut series, tick)
    }

    /// Copies every bar, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Bar> {
        self.series.read().snapshot()
    }

    /// Copies the `n` most recent bars, oldest first.
    #[must_use]
    pub fn window(&self, n: usize) -> Vec<Bar> {
        self.series.read().window(n)
    }

    /// Returns a copy of the most recent bar.
    #[must_use]
    pub fn last(&self) -> Option<Bar> {
        self.series.read().last().copied()
    }

    /// Returns the number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.read().len()
    }

    /// Returns true if the series holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.read().is_empty()
    }

    /// Unwraps the series, cloning it if other handles are still alive.
    #[must_use]
    pub fn into_series(self) -> BarSeries {
        Arc::try_unwrap(self.series)
            .map_or_else(|shared| shared.read().clone(), |lock| lock.into_inner())
    }
}
