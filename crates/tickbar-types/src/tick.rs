//! Trade event representation and parsing.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::MalformedEventError;

/// Identifier of a field carried by a raw trade event.
///
/// Each field has a wire key (the numeric identifiers used by the time and
/// sales stream) and a descriptive alias; the parser accepts either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Instrument symbol.
    Symbol,
    /// Trade time in milliseconds since the Unix epoch.
    TradeTime,
    /// Trade price.
    Price,
    /// Trade size.
    Size,
    /// Per-symbol trade sequence number.
    Sequence,
}

impl Field {
    /// Returns the key used on the wire.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Symbol => "key",
            Self::TradeTime => "1",
            Self::Price => "2",
            Self::Size => "3",
            Self::Sequence => "4",
        }
    }

    /// Returns the descriptive alias accepted in place of the wire key.
    #[must_use]
    pub const fn alias(&self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::TradeTime => "trade_time",
            Self::Price => "price",
            Self::Size => "size",
            Self::Sequence => "sequence",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.alias())
    }
}

/// Raw trade event: a mapping of field identifiers to JSON values.
///
/// This is the only shape the core accepts from an event source. Format
/// variance is collapsed here, before a [`TickRecord`] is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEvent(Map<String, Value>);

impl RawEvent {
    /// Creates an empty raw event.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Sets a field under its wire key.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.0.insert(field.key().to_string(), value.into());
        self
    }

    /// Looks up a field by wire key, then by alias.
    ///
    /// A JSON `null` is reported as absent.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.0
            .get(field.key())
            .or_else(|| self.0.get(field.alias()))
            .filter(|value| !value.is_null())
    }

    /// Returns the underlying mapping.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Parses a raw event from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Parses a raw event from the bytes of a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid UTF-8 or not a JSON object.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl From<Map<String, Value>> for RawEvent {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One parsed trade event.
///
/// Only `symbol` and `trade_time` are guaranteed. Every other attribute is
/// `None` when its raw field was absent; an unset size is not a zero size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Instrument symbol.
    pub symbol: String,
    /// Trade time as reported by the source clock.
    pub trade_time: DateTime<Utc>,
    /// Trade price, always positive when set.
    pub trade_price: Option<f64>,
    /// Trade size.
    pub trade_size: Option<u64>,
    /// Per-symbol sequence number.
    pub trade_sequence: Option<u64>,
    /// Local wall-clock time the record was parsed at. Diagnostic only.
    pub received_time: Option<DateTime<Local>>,
}

impl TickRecord {
    /// Creates a tick record with only the required attributes set.
    #[must_use]
    pub fn new(symbol: impl Into<String>, trade_time: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            trade_time,
            trade_price: None,
            trade_size: None,
            trade_sequence: None,
            received_time: None,
        }
    }

    /// Sets the trade price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.trade_price = Some(price);
        self
    }

    /// Sets the trade size.
    #[must_use]
    pub const fn with_size(mut self, size: u64) -> Self {
        self.trade_size = Some(size);
        self
    }

    /// Sets the trade sequence number.
    #[must_use]
    pub const fn with_sequence(mut self, sequence: u64) -> Self {
        self.trade_sequence = Some(sequence);
        self
    }

    /// Returns true if both price and size are set.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.trade_price.is_some() && self.trade_size.is_some()
    }

    /// Builds a tick record from a raw event.
    ///
    /// Only attributes whose raw fields are present are set. When the
    /// sequence field is present, `received_time` is stamped with the
    /// current local time.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedEventError::MissingSymbol`] or
    /// [`MalformedEventError::MissingTimestamp`] when a required field is
    /// absent, and [`MalformedEventError::InvalidField`] when a present
    /// field carries an unusable value.
    pub fn from_raw(event: &RawEvent) -> Result<Self, MalformedEventError> {
        let symbol = match event.get(Field::Symbol) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::String(_)) | None => return Err(MalformedEventError::MissingSymbol),
            Some(other) => {
                return Err(MalformedEventError::invalid(
                    Field::Symbol,
                    format!("expected a string, got {other}"),
                ));
            }
        };

        let millis = event
            .get(Field::TradeTime)
            .ok_or(MalformedEventError::MissingTimestamp)?;
        let millis = epoch_millis(millis).ok_or_else(|| {
            MalformedEventError::invalid(
                Field::TradeTime,
                format!("expected epoch milliseconds, got {millis}"),
            )
        })?;
        let trade_time = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
            MalformedEventError::invalid(Field::TradeTime, format!("{millis} is out of range"))
        })?;

        let mut tick = Self::new(symbol, trade_time);

        if let Some(value) = event.get(Field::Price) {
            let price = value
                .as_f64()
                .filter(|p| p.is_finite() && *p > 0.0)
                .ok_or_else(|| {
                    MalformedEventError::invalid(
                        Field::Price,
                        format!("expected a positive number, got {value}"),
                    )
                })?;
            tick.trade_price = Some(price);
        }

        if let Some(value) = event.get(Field::Size) {
            tick.trade_size = Some(unsigned(Field::Size, value)?);
        }

        if let Some(value) = event.get(Field::Sequence) {
            tick.trade_sequence = Some(unsigned(Field::Sequence, value)?);
            tick.received_time = Some(Local::now());
        }

        Ok(tick)
    }
}

impl TryFrom<&RawEvent> for TickRecord {
    type Error = MalformedEventError;

    fn try_from(event: &RawEvent) -> Result<Self, Self::Error> {
        Self::from_raw(event)
    }
}

/// Reads epoch milliseconds, accepting whole-valued floats such as
/// `1704205800000.0`.
fn epoch_millis(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Reads a non-negative integer, accepting whole-valued floats such as `100.0`.
fn unsigned(field: Field, value: &Value) -> Result<u64, MalformedEventError> {
    value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        })
        .ok_or_else(|| {
            MalformedEventError::invalid(
                field,
                format!("expected a non-negative integer, got {value}"),
            )
        })
}
