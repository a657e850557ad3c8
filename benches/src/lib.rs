//! Benchmark utilities for tickbar.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tickbar_lib::{Field, RawEvent, TickRecord};

/// Deterministic synthetic trade feed for benchmarks.
#[derive(Debug, Clone)]
pub struct SyntheticFeed {
    /// Time of the first trade.
    pub start: DateTime<Utc>,
    /// Trades generated per one-minute bucket.
    pub ticks_per_minute: u64,
    /// Price of the first trade.
    pub base_price: f64,
    /// Every n-th trade carries no size. Zero disables partial trades.
    pub partial_every: u64,
}

impl Default for SyntheticFeed {
    fn default() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2024, 1, 2, 14, 30, 0)
                .single()
                .unwrap_or_default(),
            ticks_per_minute: 1_000,
            base_price: 470.0,
            partial_every: 0,
        }
    }
}

impl SyntheticFeed {
    /// Generates `n` ticks in trade-time order.
    pub fn ticks(&self, n: u64) -> Vec<TickRecord> {
        (0..n).map(|i| self.tick(i)).collect()
    }

    /// Generates `n` raw events in wire format.
    pub fn events(&self, n: u64) -> Vec<RawEvent> {
        (0..n)
            .map(|i| {
                let tick = self.tick(i);
                let mut event = RawEvent::new()
                    .with(Field::Symbol, tick.symbol)
                    .with(Field::TradeTime, tick.trade_time.timestamp_millis())
                    .with(Field::Sequence, i);
                if let Some(price) = tick.trade_price {
                    event = event.with(Field::Price, price);
                }
                if let Some(size) = tick.trade_size {
                    event = event.with(Field::Size, size);
                }
                event
            })
            .collect()
    }

    fn tick(&self, i: u64) -> TickRecord {
        let spacing_ms = 60_000 / self.ticks_per_minute.max(1);
        let time = self.start + TimeDelta::milliseconds((i * spacing_ms) as i64);
        // Bounded walk around the base price.
        let offset = ((i.wrapping_mul(2_654_435_761) >> 7) % 200) as f64 * 0.01 - 1.0;

        let tick = TickRecord::new("SPY", time)
            .with_price(self.base_price + offset)
            .with_sequence(i);
        if self.partial_every > 0 && i % self.partial_every == 0 {
            tick
        } else {
            tick.with_size(i % 500 + 1)
        }
    }
}
