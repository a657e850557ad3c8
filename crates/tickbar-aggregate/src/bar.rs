//! OHLCV bar data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tickbar_types::Candle;

use crate::ClosePolicy;

/// OHLCV aggregate of every trade in one one-minute bucket.
///
/// `low <= open, close <= high` holds at all times and `volume` never
/// decreases over the bar's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Start of the bucket this bar summarizes.
    pub bucket_start: DateTime<Utc>,
    /// Price of the first trade in the bucket.
    pub open: f64,
    /// Highest trade price in the bucket.
    pub high: f64,
    /// Lowest trade price in the bucket.
    pub low: f64,
    /// Price of the last trade in the bucket.
    pub close: f64,
    /// Total traded size.
    pub volume: u64,
    #[serde(skip)]
    first_sequence: Option<u64>,
    #[serde(skip)]
    last_sequence: Option<u64>,
}

impl Bar {
    /// Creates a bar from finalized OHLCV values.
    #[must_use]
    pub const fn new(
        bucket_start: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            bucket_start,
            open,
            high,
            low,
            close,
            volume,
            first_sequence: None,
            last_sequence: None,
        }
    }

    /// Opens a bar from the first trade of its bucket.
    pub(crate) const fn from_trade(
        bucket_start: DateTime<Utc>,
        price: f64,
        size: u64,
        sequence: Option<u64>,
    ) -> Self {
        Self {
            first_sequence: sequence,
            last_sequence: sequence,
            ..Self::new(bucket_start, price, price, price, price, size)
        }
    }

    /// Copies a historical candle verbatim under the given bucket key.
    pub(crate) const fn from_candle(bucket_start: DateTime<Utc>, candle: &Candle) -> Self {
        Self::new(
            bucket_start,
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.volume,
        )
    }

    /// Folds one more trade of the same bucket into the bar.
    pub(crate) fn absorb(
        &mut self,
        price: f64,
        size: u64,
        sequence: Option<u64>,
        policy: ClosePolicy,
    ) {
        let (takes_open, takes_close) = match (policy, sequence) {
            (ClosePolicy::Sequence, Some(seq)) => (
                self.first_sequence.is_some_and(|first| seq < first),
                self.last_sequence.is_none_or(|last| seq >= last),
            ),
            _ => (false, true),
        };

        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.volume = self.volume.saturating_add(size);

        if takes_open {
            self.open = price;
            self.first_sequence = sequence;
        }
        if takes_close {
            self.close = price;
            if sequence.is_some() {
                self.last_sequence = sequence;
            }
        }
    }

    /// Sequence number of the trade that set `open`, if known.
    #[must_use]
    pub const fn first_sequence(&self) -> Option<u64> {
        self.first_sequence
    }

    /// Sequence number of the trade that last set `close`, if known.
    #[must_use]
    pub const fn last_sequence(&self) -> Option<u64> {
        self.last_sequence
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the midpoint of the range ((high + low) / 2).
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Returns true if this is a bullish (green) bar.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (red) bar.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_from_trade() {
        let bar = Bar::from_trade(start(), 100.0, 50, Some(7));

        assert_relative_eq!(bar.open, 100.0);
        assert_relative_eq!(bar.high, 100.0);
        assert_relative_eq!(bar.low, 100.0);
        assert_relative_eq!(bar.close, 100.0);
        assert_eq!(bar.volume, 50);
        assert_eq!(bar.first_sequence(), Some(7));
        assert_eq!(bar.last_sequence(), Some(7));
    }

    #[test]
    fn test_absorb_arrival() {
        let mut bar = Bar::from_trade(start(), 100.0, 50, None);
        bar.absorb(103.0, 10, None, ClosePolicy::Arrival);
        bar.absorb(98.5, 5, None, ClosePolicy::Arrival);
        bar.absorb(101.0, 0, None, ClosePolicy::Arrival);

        assert_relative_eq!(bar.open, 100.0);
        assert_relative_eq!(bar.high, 103.0);
        assert_relative_eq!(bar.low, 98.5);
        assert_relative_eq!(bar.close, 101.0);
        assert_eq!(bar.volume, 65);
    }

    #[test]
    fn test_absorb_sequence_out_of_order() {
        let mut bar = Bar::from_trade(start(), 100.0, 1, Some(10));
        bar.absorb(105.0, 1, Some(12), ClosePolicy::Sequence);
        // Late delivery of an earlier trade.
        bar.absorb(99.0, 1, Some(8), ClosePolicy::Sequence);

        assert_relative_eq!(bar.open, 99.0);
        assert_relative_eq!(bar.close, 105.0);
        assert_relative_eq!(bar.low, 99.0);
        assert_eq!(bar.first_sequence(), Some(8));
        assert_eq!(bar.last_sequence(), Some(12));
        assert_eq!(bar.volume, 3);
    }

    #[test]
    fn test_absorb_sequence_falls_back_to_arrival() {
        let mut bar = Bar::from_trade(start(), 100.0, 1, Some(10));
        bar.absorb(95.0, 1, None, ClosePolicy::Sequence);

        assert_relative_eq!(bar.close, 95.0);
        assert_eq!(bar.last_sequence(), Some(10));
    }

    #[test]
    fn test_volume_saturates() {
        let mut bar = Bar::from_trade(start(), 1.0, u64::MAX - 1, None);
        bar.absorb(1.0, 10, None, ClosePolicy::Arrival);
        assert_eq!(bar.volume, u64::MAX);
    }

    #[test]
    fn test_shape_helpers() {
        let bar = Bar::new(start(), 10.0, 12.0, 9.0, 11.0, 1000);

        assert_relative_eq!(bar.range(), 3.0);
        assert_relative_eq!(bar.midpoint(), 10.5);
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
    }

    #[test]
    fn test_serialized_fields() {
        let bar = Bar::from_trade(start(), 1.5, 2, Some(3));
        let json = serde_json::to_value(bar).unwrap();

        assert_eq!(json["volume"], 2);
        assert!(json.get("last_sequence").is_none());
    }
}
