//! Building the initial bar series from historical candles.

use tickbar_types::{Candle, EmptyHistoryError};
use tracing::{debug, warn};

use crate::{Bar, BarSeries, bucket};

/// Whether an empty history is acceptable when seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeedMode {
    /// An empty history yields an empty series.
    #[default]
    AllowEmpty,
    /// An empty history is an [`EmptyHistoryError`].
    RequireNonEmpty,
}

/// Builds a bar series with one bar per historical candle.
///
/// Candle values are copied verbatim, never re-aggregated. Each candle is
/// keyed by the bucket containing its timestamp so that live ticks for the
/// same minute update the seeded bar. If two candles fall into the same
/// bucket the later one replaces the earlier.
///
/// # Errors
///
/// Returns [`EmptyHistoryError`] if `candles` is empty and `mode` is
/// [`SeedMode::RequireNonEmpty`].
pub fn seed<I>(candles: I, mode: SeedMode) -> Result<BarSeries, EmptyHistoryError>
where
    I: IntoIterator<Item = Candle>,
{
    let mut series = BarSeries::new();

    for candle in candles {
        if !candle.is_consistent() {
            warn!(timestamp = %candle.timestamp, "seeding candle whose high/low do not bound open/close");
        }

        let key = bucket(&candle.timestamp);
        if series.replace(Bar::from_candle(key, &candle)).is_some() {
            warn!(bucket = %key, "duplicate historical candle replaced an earlier one");
        }
    }

    if series.is_empty() && mode == SeedMode::RequireNonEmpty {
        return Err(EmptyHistoryError);
    }

    debug!(bars = series.len(), "seeded bar series from history");
    Ok(series)
}
