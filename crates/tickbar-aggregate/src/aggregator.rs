//! Incremental tick-to-bar aggregation.

use std::collections::btree_map::Entry;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tickbar_types::TickRecord;
use tracing::trace;

use crate::{Bar, BarSeries, bucket};

/// Rule deciding which trade sets a bar's `close` (and `open`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosePolicy {
    /// Last trade to arrive wins, regardless of its sequence number.
    #[default]
    Arrival,
    /// Highest sequence number wins `close` and lowest wins `open`.
    ///
    /// Ticks without a sequence number fall back to arrival order.
    Sequence,
}

impl ClosePolicy {
    /// Returns the policy as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Arrival => "arrival",
            Self::Sequence => "sequence",
        }
    }
}

impl std::fmt::Display for ClosePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClosePolicy {
    type Err = ClosePolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "arrival" | "last" => Ok(Self::Arrival),
            "sequence" | "seq" => Ok(Self::Sequence),
            _ => Err(ClosePolicyParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid close policy string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosePolicyParseError(String);

impl std::fmt::Display for ClosePolicyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid close policy '{}', expected one of: arrival, sequence",
            self.0
        )
    }
}

impl std::error::Error for ClosePolicyParseError {}

/// Why a tick was not aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The tick carries no trade price.
    MissingPrice,
    /// The tick carries no trade size.
    MissingSize,
}

/// Outcome of applying one tick to a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Applied {
    /// A new bar was opened for this bucket.
    Created(DateTime<Utc>),
    /// The existing bar for this bucket was updated.
    Updated(DateTime<Utc>),
    /// The tick was partial and the series is unchanged.
    Skipped(SkipReason),
}

impl Applied {
    /// Returns the bucket that was touched, if any.
    #[must_use]
    pub const fn bucket(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Created(b) | Self::Updated(b) => Some(*b),
            Self::Skipped(_) => None,
        }
    }

    /// Returns true if the series was left unchanged.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Applies tick records to a bar series.
///
/// The aggregator itself is stateless apart from its [`ClosePolicy`]; all
/// state lives in the [`BarSeries`] it is handed, including series seeded
/// from history.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickAggregator {
    policy: ClosePolicy,
}

impl TickAggregator {
    /// Creates a new aggregator with the given close policy.
    #[must_use]
    pub const fn new(policy: ClosePolicy) -> Self {
        Self { policy }
    }

    /// Returns the close policy in use.
    #[must_use]
    pub const fn policy(&self) -> ClosePolicy {
        self.policy
    }

    /// Folds a tick into the bar for its bucket, opening the bar if needed.
    ///
    /// A tick without price or size is a no-op and reports
    /// [`Applied::Skipped`]; it is expected from the wire format and is not
    /// an error.
    pub fn apply(&self, series: &mut BarSeries, tick: &TickRecord) -> Applied {
        let Some(price) = tick.trade_price else {
            return Applied::Skipped(SkipReason::MissingPrice);
        };
        let Some(size) = tick.trade_size else {
            return Applied::Skipped(SkipReason::MissingSize);
        };

        let key = bucket(&tick.trade_time);
        match series.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.get_mut()
                    .absorb(price, size, tick.trade_sequence, self.policy);
                trace!(symbol = %tick.symbol, bucket = %key, price, size, "bar updated");
                Applied::Updated(key)
            }
            Entry::Vacant(slot) => {
                slot.insert(Bar::from_trade(key, price, size, tick.trade_sequence));
                trace!(symbol = %tick.symbol, bucket = %key, price, size, "bar opened");
                Applied::Created(key)
            }
        }
    }
}

/// Applies a tick with the default [`ClosePolicy::Arrival`] rule.
pub fn apply(series: &mut BarSeries, tick: &TickRecord) -> Applied {
    TickAggregator::default().apply(series, tick)
}
