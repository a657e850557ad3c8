//! Historical candle representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A finalized historical OHLCV candle.
///
/// Candles come from a batch price-history query and are used verbatim to
/// seed a bar series. The serialized form matches the broker's price-history
/// document, where `datetime` is epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Candle open time (start of the period).
    #[serde(rename = "datetime", with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price during the period.
    pub high: f64,
    /// Lowest price during the period.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Total traded volume.
    pub volume: u64,
}

impl Candle {
    /// Creates a new candle.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns true if high and low bound open and close.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.low <= self.high
            && self.low <= self.open.min(self.close)
            && self.high >= self.open.max(self.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_price_history_candle() {
        let json = r#"{"open":10.0,"high":12.0,"low":9.0,"close":11.0,"volume":1000,"datetime":1640000040000}"#;
        let candle: Candle = serde_json::from_str(json).unwrap();

        assert_eq!(
            candle.timestamp,
            Utc.timestamp_millis_opt(1_640_000_040_000).unwrap()
        );
        assert_eq!(candle.volume, 1000);
        assert!(candle.is_consistent());
    }

    #[test]
    fn test_inconsistent_candle() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let candle = Candle::new(timestamp, 10.0, 9.5, 9.0, 11.0, 1);
        assert!(!candle.is_consistent());
    }
}
